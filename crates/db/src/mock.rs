//! mockall doubles of the storage traits, for failure injection in tests of
//! the crates built on top of the store.

pub mod repositories;
