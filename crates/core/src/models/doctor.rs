use serde::{Deserialize, Serialize};

use super::{optional_text, require_id, require_text};
use crate::errors::BookingResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub specialization_id: i64,
    pub education: Option<String>,
    pub progress: Option<String>,
    /// Mean of the ratings on this doctor's appointments; `None` until a
    /// rated appointment exists.
    pub rating: Option<f64>,
    pub photo_path: Option<String>,
}

impl Doctor {
    /// "Surname Name Patronymic", skipping a missing patronymic.
    pub fn full_name(&self) -> String {
        match &self.patronymic {
            Some(patronymic) => format!("{} {} {}", self.surname, self.name, patronymic),
            None => format!("{} {}", self.surname, self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: i64,
    pub specialization: String,
    pub specialization_doctor: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationDoctorsResponse {
    pub specialization: Specialization,
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpecializationRequest {
    /// Field of medicine, e.g. "Cardiology"
    pub specialization: String,
    /// Title of a practitioner, e.g. "Cardiologist"
    pub specialization_doctor: String,
    pub description: Option<String>,
}

/// A specialization that has passed validation and has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpecialization {
    pub specialization: String,
    pub specialization_doctor: String,
    pub description: Option<String>,
}

impl CreateSpecializationRequest {
    pub fn validate(&self) -> BookingResult<NewSpecialization> {
        Ok(NewSpecialization {
            specialization: require_text("specialization", &self.specialization)?,
            specialization_doctor: require_text(
                "specialization_doctor",
                &self.specialization_doctor,
            )?,
            description: optional_text(self.description.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub specialization_id: i64,
    pub education: Option<String>,
    pub progress: Option<String>,
    pub photo_path: Option<String>,
}

/// A doctor that has passed validation and has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub surname: String,
    pub name: String,
    pub patronymic: Option<String>,
    pub specialization_id: i64,
    pub education: Option<String>,
    pub progress: Option<String>,
    pub photo_path: Option<String>,
}

impl CreateDoctorRequest {
    pub fn validate(&self) -> BookingResult<NewDoctor> {
        Ok(NewDoctor {
            surname: require_text("surname", &self.surname)?,
            name: require_text("name", &self.name)?,
            patronymic: optional_text(self.patronymic.as_deref()),
            specialization_id: require_id("specialization_id", self.specialization_id)?,
            education: optional_text(self.education.as_deref()),
            progress: optional_text(self.progress.as_deref()),
            photo_path: optional_text(self.photo_path.as_deref()),
        })
    }
}

impl NewDoctor {
    pub fn with_id(self, id: i64) -> Doctor {
        Doctor {
            id,
            surname: self.surname,
            name: self.name,
            patronymic: self.patronymic,
            specialization_id: self.specialization_id,
            education: self.education,
            progress: self.progress,
            rating: None,
            photo_path: self.photo_path,
        }
    }
}

impl NewSpecialization {
    pub fn with_id(self, id: i64) -> Specialization {
        Specialization {
            id,
            specialization: self.specialization,
            specialization_doctor: self.specialization_doctor,
            description: self.description,
        }
    }
}
