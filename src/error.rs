// src/error.rs
//! Validation errors for the fallible parsing edges of the crate.
//!
//! Normalization itself never fails: missing or malformed payload fields
//! degrade to the documented empty value for each endpoint. Errors exist only
//! where caller-supplied strings are turned into the closed vocabularies
//! (`Period`, `StatsEndpoint`) or into calendar dates.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown stats period: {0}")]
    InvalidPeriod(String),

    #[error("Unknown stats endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("Invalid stats date: {0}")]
    InvalidDate(String),
}
