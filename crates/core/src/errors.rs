use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Slot is busy: {0}")]
    SlotBusy(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("Invalid slot duration: {0} minutes")]
    InvalidDuration(i64),

    #[error("Invalid rating: {0} (expected a value between 0 and 5)")]
    InvalidRating(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Booking failed: {0}")]
    BookingFailed(#[source] eyre::Report),

    #[error("Cancellation failed: {0}")]
    CancelFailed(#[source] eyre::Report),

    #[error("Schedule persist failed: {0}")]
    PersistFailed(#[source] eyre::Report),

    #[error("Operation timed out: {0}")]
    Timeout(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

impl BookingError {
    /// Whether the caller may safely retry the same request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BookingError::BookingFailed(_)
                | BookingError::CancelFailed(_)
                | BookingError::PersistFailed(_)
                | BookingError::Timeout(_)
        )
    }

    /// Input rejected before any storage access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidRange(_)
                | BookingError::InvalidDuration(_)
                | BookingError::InvalidRating(_)
                | BookingError::InvalidInput(_)
        )
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
