//! # ClinicBook Core
//!
//! Appointment booking against time-slotted doctor schedules.
//!
//! ## Architecture
//!
//! - **Models**: doctors, slots, appointments and the typed requests that
//!   reach the core
//! - **Generator**: pure slot generation for a doctor's working interval
//! - **Store**: storage traits plus an in-memory implementation
//! - **Services**: the booking coordinator, status lifecycle, rating
//!   aggregator and the `ClinicService` facade over them
//!
//! The one guarantee everything else is built around: a slot is held by at
//! most one scheduled appointment, even under concurrent bookings.

/// Time budgets for storage calls
pub mod config;
/// Domain error taxonomy
pub mod errors;
/// Slot generation from a working interval
pub mod generator;
/// Domain models and typed requests
pub mod models;
/// Booking, lifecycle, rating and directory services
pub mod services;
/// Storage traits and the in-memory store
pub mod store;

pub use config::BookingConfig;
pub use errors::{BookingError, BookingResult};
pub use services::clinic::ClinicService;
