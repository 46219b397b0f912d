use crate::models::{DbDoctor, DbSpecialization};
use clinicbook_core::models::doctor::{NewDoctor, NewSpecialization};
use eyre::Result;
use sqlx::{Pool, Postgres};

const DOCTOR_COLUMNS: &str =
    "id, surname, name, patronymic, specialization_id, education, progress, rating, photo_path";

const SPECIALIZATION_COLUMNS: &str = "id, specialization, specialization_doctor, description";

pub async fn list_specializations(pool: &Pool<Postgres>) -> Result<Vec<DbSpecialization>> {
    let specializations = sqlx::query_as::<_, DbSpecialization>(&format!(
        r#"
        SELECT {SPECIALIZATION_COLUMNS}
        FROM specialization
        ORDER BY id ASC
        "#
    ))
    .fetch_all(pool)
    .await?;

    Ok(specializations)
}

pub async fn create_specialization(
    pool: &Pool<Postgres>,
    specialization: &NewSpecialization,
) -> Result<DbSpecialization> {
    let created = sqlx::query_as::<_, DbSpecialization>(&format!(
        r#"
        INSERT INTO specialization (specialization, specialization_doctor, description)
        VALUES ($1, $2, $3)
        RETURNING {SPECIALIZATION_COLUMNS}
        "#
    ))
    .bind(&specialization.specialization)
    .bind(&specialization.specialization_doctor)
    .bind(&specialization.description)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Specialization created: id={}", created.id);
    Ok(created)
}

/// Deleting a specialization cascades to its doctors and from them to their
/// slots and appointments. Returns `false` when no row had the id.
pub async fn delete_specialization(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let deleted = sqlx::query("DELETE FROM specialization WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

/// Inserts the doctor only if the specialization exists; `None` otherwise.
pub async fn create_doctor(pool: &Pool<Postgres>, doctor: &NewDoctor) -> Result<Option<DbDoctor>> {
    let created = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        INSERT INTO doctors
            (surname, name, patronymic, specialization_id, education, progress, photo_path)
        SELECT $1, $2, $3, $4, $5, $6, $7
        WHERE EXISTS (SELECT 1 FROM specialization WHERE id = $4)
        RETURNING {DOCTOR_COLUMNS}
        "#
    ))
    .bind(&doctor.surname)
    .bind(&doctor.name)
    .bind(&doctor.patronymic)
    .bind(doctor.specialization_id)
    .bind(&doctor.education)
    .bind(&doctor.progress)
    .bind(&doctor.photo_path)
    .fetch_optional(pool)
    .await?;

    if let Some(created) = &created {
        tracing::debug!("Doctor created: id={}", created.id);
    }
    Ok(created)
}

/// Deleting a doctor cascades to their slots and appointments.
pub async fn delete_doctor(pool: &Pool<Postgres>, id: i64) -> Result<bool> {
    let deleted = sqlx::query("DELETE FROM doctors WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn get_doctor(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbDoctor>> {
    let doctor = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        SELECT {DOCTOR_COLUMNS}
        FROM doctors
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

pub async fn get_specialization(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<Option<DbSpecialization>> {
    let specialization = sqlx::query_as::<_, DbSpecialization>(&format!(
        r#"
        SELECT {SPECIALIZATION_COLUMNS}
        FROM specialization
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(specialization)
}

pub async fn get_doctors_by_specialization(
    pool: &Pool<Postgres>,
    specialization_id: i64,
) -> Result<Vec<DbDoctor>> {
    let doctors = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        SELECT {DOCTOR_COLUMNS}
        FROM doctors
        WHERE specialization_id = $1
        ORDER BY id ASC
        "#
    ))
    .bind(specialization_id)
    .fetch_all(pool)
    .await?;

    Ok(doctors)
}

pub async fn get_doctor_ids_by_specialization(
    pool: &Pool<Postgres>,
    specialization_id: i64,
) -> Result<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM doctors
        WHERE specialization_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(specialization_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Mean of the set ratings on the doctor's appointments, any status.
pub async fn average_rating(pool: &Pool<Postgres>, doctor_id: i64) -> Result<Option<f64>> {
    let average = sqlx::query_scalar::<_, Option<f64>>(
        r#"
        SELECT AVG(rating)
        FROM appointments
        WHERE doctor_id = $1 AND rating IS NOT NULL
        "#,
    )
    .bind(doctor_id)
    .fetch_one(pool)
    .await?;

    Ok(average)
}

/// Returns `false` when no doctor has the id.
pub async fn set_doctor_rating(pool: &Pool<Postgres>, doctor_id: i64, rating: f64) -> Result<bool> {
    let updated = sqlx::query(
        r#"
        UPDATE doctors
        SET rating = $2
        WHERE id = $1
        "#,
    )
    .bind(doctor_id)
    .bind(rating)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(updated > 0)
}
