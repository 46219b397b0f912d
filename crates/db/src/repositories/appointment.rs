use crate::models::DbAppointment;
use chrono::NaiveDateTime;
use clinicbook_core::{
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
    store::{AppointmentScope, BookingOutcome, CancelOutcome},
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, doctor_id, patient_id, date, time, status_id, rating";

fn scope_filter(scope: AppointmentScope) -> (&'static str, i64) {
    match scope {
        AppointmentScope::Patient(id) => ("patient_id", id),
        AppointmentScope::Doctor(id) => ("doctor_id", id),
    }
}

/// Reserves the slot and inserts the appointment in one transaction.
///
/// The reservation only matches an available slot, so of several concurrent
/// callers exactly one sees a row updated; the rest roll back.
pub async fn book_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    booking: &NewAppointment,
) -> Result<BookingOutcome> {
    let mut tx = pool.begin().await?;

    let reserved = sqlx::query(
        r#"
        UPDATE doctor_schedules
        SET is_available = FALSE
        WHERE doctor_id = $1 AND date = $2 AND start_time = $3 AND is_available = TRUE
        "#,
    )
    .bind(booking.doctor_id)
    .bind(booking.date)
    .bind(booking.time)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if reserved == 0 {
        tx.rollback().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM doctor_schedules
                WHERE doctor_id = $1 AND date = $2 AND start_time = $3
            )
            "#,
        )
        .bind(booking.doctor_id)
        .bind(booking.date)
        .bind(booking.time)
        .fetch_one(pool)
        .await?;

        tracing::debug!("Slot {} not reserved, exists={}", booking.slot_key(), exists);
        return Ok(if exists {
            BookingOutcome::SlotBusy
        } else {
            BookingOutcome::SlotMissing
        });
    }

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (id, doctor_id, patient_id, date, time, status_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(booking.doctor_id)
    .bind(booking.patient_id)
    .bind(booking.date)
    .bind(booking.time)
    .bind(AppointmentStatus::Scheduled.id())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(BookingOutcome::Booked(Appointment::try_from(row)?))
}

/// Cancels a Scheduled appointment and frees its exact slot in one
/// transaction. The appointment row stays locked until commit.
pub async fn cancel_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<CancelOutcome> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE id = $1
        FOR UPDATE
        "#
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(CancelOutcome::Missing);
    };
    let appointment = Appointment::try_from(row)?;

    if appointment.status.is_terminal() {
        tx.rollback().await?;
        return Ok(CancelOutcome::AlreadyTerminal(appointment));
    }

    sqlx::query(
        r#"
        UPDATE appointments
        SET status_id = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(AppointmentStatus::Canceled.id())
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE doctor_schedules
        SET is_available = TRUE
        WHERE doctor_id = $1 AND date = $2 AND start_time = $3
        "#,
    )
    .bind(appointment.doctor_id)
    .bind(appointment.date)
    .bind(appointment.time)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(CancelOutcome::Canceled(Appointment {
        status: AppointmentStatus::Canceled,
        ..appointment
    }))
}

pub async fn get_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Returns `false` when no appointment has the id.
pub async fn set_rating(pool: &Pool<Postgres>, id: Uuid, rating: f64) -> Result<bool> {
    let updated = sqlx::query(
        r#"
        UPDATE appointments
        SET rating = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(rating)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(updated > 0)
}

pub async fn complete_overdue(
    pool: &Pool<Postgres>,
    scope: AppointmentScope,
    now: NaiveDateTime,
) -> Result<u64> {
    let (column, owner_id) = scope_filter(scope);

    let promoted = sqlx::query(&format!(
        r#"
        UPDATE appointments
        SET status_id = $1
        WHERE {column} = $2
          AND status_id = $3
          AND (date < $4 OR (date = $4 AND time < $5))
        "#
    ))
    .bind(AppointmentStatus::Completed.id())
    .bind(owner_id)
    .bind(AppointmentStatus::Scheduled.id())
    .bind(now.date())
    .bind(now.time())
    .execute(pool)
    .await?
    .rows_affected();

    Ok(promoted)
}

pub async fn list_appointments(
    pool: &Pool<Postgres>,
    scope: AppointmentScope,
) -> Result<Vec<DbAppointment>> {
    let (column, owner_id) = scope_filter(scope);

    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE {column} = $1
        ORDER BY date ASC, time ASC, id ASC
        "#
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
