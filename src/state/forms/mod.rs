//! Form domain layer
//!
//! Field declarations, validation rules, and the engine that owns a form's
//! values, errors and submit lifecycle.

mod field;
mod form_state;
mod rules;
mod schemas;

pub use field::FieldSpec;
pub use form_state::{FormEngine, FormValues, SubmitOutcome, ValidationMode};
pub use schemas::FormKind;
