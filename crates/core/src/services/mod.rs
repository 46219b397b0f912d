pub mod booking;
pub mod clinic;
pub mod directory;
pub mod lifecycle;
pub mod rating;
pub mod schedule;

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::{BookingError, BookingResult};

/// Runs a storage call under a deadline. An expired call is dropped, which
/// rolls back any transaction it had open.
pub(crate) async fn bounded<T, F>(operation: &'static str, limit: Duration, call: F) -> BookingResult<T>
where
    F: Future<Output = BookingResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = limit.as_millis() as u64, "Storage call timed out");
            Err(BookingError::Timeout(operation))
        }
    }
}

/// Reclassifies a raw storage failure inside a transactional unit as the
/// unit's own failure kind. Other errors pass through unchanged.
pub(crate) fn transactional(err: BookingError, kind: fn(eyre::Report) -> BookingError) -> BookingError {
    match err {
        BookingError::Database(report) => kind(report),
        other => other,
    }
}

/// Like [`transactional`], but an expired deadline is reported as the
/// unit's failure kind too.
pub(crate) fn unit_failed(err: BookingError, kind: fn(eyre::Report) -> BookingError) -> BookingError {
    match transactional(err, kind) {
        BookingError::Timeout(operation) => kind(eyre::eyre!("{operation} timed out")),
        other => other,
    }
}
