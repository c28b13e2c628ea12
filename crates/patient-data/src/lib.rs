//! Patient Data Model
//!
//! Provides the raw patient attribute record consumed by the screening
//! cascade, plus the pure normalization functions for gender and APOE
//! genotype inputs.

mod normalizer;
mod record;

pub use normalizer::{normalize_apoe4, normalize_gender};
pub use record::{fields, AttrValue, PatientRecord};

use thiserror::Error;

/// Errors while coercing raw attribute values into numeric features
#[derive(Debug, Clone, Error)]
pub enum CoercionError {
    /// A string value was supplied where a number was expected
    #[error("{field}: cannot interpret {value:?} as a number")]
    NonNumeric { field: String, value: String },
}
