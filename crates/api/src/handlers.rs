pub mod appointments;
pub mod doctors;
pub mod schedule;
pub mod specializations;
