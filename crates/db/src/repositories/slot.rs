use crate::models::DbSlot;
use clinicbook_core::models::slot::{Slot, SlotKey};
use chrono::NaiveDate;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};

/// Inserts the whole batch in one transaction; any failed row, including a
/// duplicate (doctor, date, start), leaves the table untouched.
pub async fn insert_slots(pool: &Pool<Postgres>, doctor_id: i64, slots: &[Slot]) -> Result<u64> {
    if let Some(foreign) = slots.iter().find(|slot| slot.doctor_id != doctor_id) {
        return Err(eyre!(
            "slot {} does not belong to doctor {}",
            foreign.key(),
            doctor_id
        ));
    }

    tracing::debug!("Inserting {} slots for doctor {}", slots.len(), doctor_id);

    let mut tx = pool.begin().await?;
    for slot in slots {
        sqlx::query(
            r#"
            INSERT INTO doctor_schedules (doctor_id, date, start_time, end_time, is_available)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(doctor_id)
        .bind(slot.date)
        .bind(slot.start)
        .bind(slot.end)
        .bind(slot.is_available)
        .execute(&mut *tx)
        .await
        .map_err(|e| eyre!("failed to insert slot {}: {}", slot.key(), e))?;
    }
    tx.commit().await?;

    Ok(slots.len() as u64)
}

pub async fn get_slots_from(
    pool: &Pool<Postgres>,
    doctor_id: i64,
    from: NaiveDate,
) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT doctor_id, date, start_time, end_time, is_available
        FROM doctor_schedules
        WHERE doctor_id = $1 AND date >= $2
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(doctor_id)
    .bind(from)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn get_slot(pool: &Pool<Postgres>, key: SlotKey) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT doctor_id, date, start_time, end_time, is_available
        FROM doctor_schedules
        WHERE doctor_id = $1 AND date = $2 AND start_time = $3
        "#,
    )
    .bind(key.doctor_id)
    .bind(key.date)
    .bind(key.start)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}
