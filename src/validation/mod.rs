//! Form processing: raw submission, normalized values, validated values,
//! sanitized entity input.
//!
//! Each entity form runs the same stages in order. Multi-valued fields are
//! normalized first, every field runs its own check chain, and sanitizers
//! run on the checked values whether or not validation passed, so a rejected
//! form is re-rendered with the same escaped values that would have been
//! stored.

pub mod field;
pub mod rules;
pub mod sanitize;

use serde::Serialize;

pub use field::FieldValue;
pub use rules::{Check, FieldError, FieldRule, Validator};

/// A submission that failed validation: the sanitized values to show back in
/// the form, and the failures in field order.
#[derive(Debug, Clone, Serialize)]
pub struct Rejected<D> {
    pub draft: D,
    pub errors: Vec<FieldError>,
}

impl<D> Rejected<D> {
    pub fn messages(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.msg).collect()
    }
}
