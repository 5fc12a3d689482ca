//! Inbound submission validation

mod submission_validator;

pub use submission_validator::{validate, ValidationFailure};
