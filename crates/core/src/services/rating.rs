//! # Rating Aggregator
//!
//! A doctor's rating is the arithmetic mean of every rating patients left on
//! that doctor's appointments. It is recomputed before doctor reads rather
//! than maintained incrementally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::bounded;
use crate::config::BookingConfig;
use crate::errors::BookingResult;
use crate::store::DoctorStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingOutcome {
    /// The stored rating was replaced by this mean.
    Updated(f64),
    /// Nothing to average; the stored rating was left as it was.
    NoRatings,
}

#[derive(Debug)]
pub struct DoctorRating {
    pub doctor_id: i64,
    pub outcome: BookingResult<RatingOutcome>,
}

/// Per-doctor results of a specialization-wide recomputation.
#[derive(Debug)]
pub struct RatingBatch {
    pub specialization_id: i64,
    pub results: Vec<DoctorRating>,
}

impl RatingBatch {
    pub fn updated(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Ok(RatingOutcome::Updated(_))))
            .count()
    }

    pub fn no_ratings(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Ok(RatingOutcome::NoRatings)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_err()).count()
    }

    pub fn summary(&self) -> RatingBatchSummary {
        let mut summary = RatingBatchSummary {
            specialization_id: self.specialization_id,
            updated: Vec::new(),
            no_ratings: Vec::new(),
            failed: Vec::new(),
        };
        for result in &self.results {
            match &result.outcome {
                Ok(RatingOutcome::Updated(rating)) => summary.updated.push(UpdatedRating {
                    doctor_id: result.doctor_id,
                    rating: *rating,
                }),
                Ok(RatingOutcome::NoRatings) => summary.no_ratings.push(result.doctor_id),
                Err(err) => summary.failed.push(FailedRating {
                    doctor_id: result.doctor_id,
                    error: err.to_string(),
                }),
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedRating {
    pub doctor_id: i64,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRating {
    pub doctor_id: i64,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBatchSummary {
    pub specialization_id: i64,
    pub updated: Vec<UpdatedRating>,
    pub no_ratings: Vec<i64>,
    pub failed: Vec<FailedRating>,
}

#[derive(Clone)]
pub struct RatingAggregator {
    doctors: Arc<dyn DoctorStore>,
    config: BookingConfig,
}

impl RatingAggregator {
    pub fn new(doctors: Arc<dyn DoctorStore>, config: BookingConfig) -> Self {
        Self { doctors, config }
    }

    pub async fn recompute_rating(&self, doctor_id: i64) -> BookingResult<RatingOutcome> {
        let limit = self.config.rating_timeout;

        let Some(rating) =
            bounded("average_rating", limit, self.doctors.average_rating(doctor_id)).await?
        else {
            debug!(doctor_id, "No rated appointments");
            return Ok(RatingOutcome::NoRatings);
        };

        bounded(
            "set_doctor_rating",
            limit,
            self.doctors.set_doctor_rating(doctor_id, rating),
        )
        .await?;

        info!(doctor_id, rating, "Updated doctor rating");
        Ok(RatingOutcome::Updated(rating))
    }

    /// Recomputes every doctor of the specialization. A failure for one
    /// doctor is recorded in the batch and the rest still run; only failing
    /// to list the doctors aborts the call.
    pub async fn recompute_for_specialization(
        &self,
        specialization_id: i64,
    ) -> BookingResult<RatingBatch> {
        let doctor_ids = bounded(
            "doctor_ids_for_specialization",
            self.config.rating_timeout,
            self.doctors.doctor_ids_for_specialization(specialization_id),
        )
        .await?;

        let mut results = Vec::with_capacity(doctor_ids.len());
        for doctor_id in doctor_ids {
            let outcome = self.recompute_rating(doctor_id).await;
            if let Err(err) = &outcome {
                warn!(doctor_id, specialization_id, error = %err, "Failed to update doctor rating");
            }
            results.push(DoctorRating { doctor_id, outcome });
        }

        let batch = RatingBatch {
            specialization_id,
            results,
        };
        info!(
            specialization_id,
            updated = batch.updated(),
            no_ratings = batch.no_ratings(),
            failed = batch.failed(),
            "Recomputed specialization ratings"
        );
        Ok(batch)
    }
}
