use std::time::Duration;

/// Time budgets for storage calls made by the booking services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingConfig {
    /// Reads, bookings, cancellations and schedule writes.
    pub query_timeout: Duration,
    /// Rating recomputation, which may scan many appointments.
    pub rating_timeout: Duration,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(5),
            rating_timeout: Duration::from_secs(30),
        }
    }
}
