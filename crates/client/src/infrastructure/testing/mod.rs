//! Test-only helpers shared by unit tests across the crate.

pub mod fixtures;
