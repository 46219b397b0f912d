use clinicbook_core::models::appointment::AppointmentStatus;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS specialization (
            id BIGSERIAL PRIMARY KEY,
            specialization VARCHAR(255) NOT NULL,
            specialization_doctor VARCHAR(255) NOT NULL,
            description TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id BIGSERIAL PRIMARY KEY,
            surname VARCHAR(255) NOT NULL,
            name VARCHAR(255) NOT NULL,
            patronymic VARCHAR(255) NULL,
            specialization_id BIGINT NOT NULL REFERENCES specialization(id) ON DELETE CASCADE,
            education TEXT NULL,
            progress TEXT NULL,
            rating DOUBLE PRECISION NULL,
            photo_path VARCHAR(512) NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One row per reservable slot
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctor_schedules (
            id BIGSERIAL PRIMARY KEY,
            doctor_id BIGINT NOT NULL REFERENCES doctors(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT valid_slot_range CHECK (end_time > start_time),
            CONSTRAINT unique_doctor_slot UNIQUE (doctor_id, date, start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS status_appointment (
            id SMALLINT PRIMARY KEY,
            code VARCHAR(32) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    for status in [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Canceled,
    ] {
        sqlx::query(
            r#"
            INSERT INTO status_appointment (id, code)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(status.id())
        .bind(status.code())
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY,
            doctor_id BIGINT NOT NULL REFERENCES doctors(id) ON DELETE CASCADE,
            patient_id BIGINT NOT NULL,
            date DATE NOT NULL,
            time TIME NOT NULL,
            status_id SMALLINT NOT NULL DEFAULT 1 REFERENCES status_appointment(id),
            rating DOUBLE PRECISION NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_rating CHECK (rating IS NULL OR (rating >= 0 AND rating <= 5))
        );
        "#,
    )
    .execute(pool)
    .await?;

    for index in [
        "CREATE INDEX IF NOT EXISTS idx_doctors_specialization_id ON doctors(specialization_id)",
        "CREATE INDEX IF NOT EXISTS idx_doctor_schedules_doctor_date ON doctor_schedules(doctor_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_doctor_id ON appointments(doctor_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_status_id ON appointments(status_id)",
    ] {
        sqlx::query(index).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
