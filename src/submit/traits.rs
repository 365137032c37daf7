//! Trait abstraction for the submit collaborator to enable mocking in tests

use crate::state::FormValues;
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a submit collaborator after local validation passed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Attributed to a single field, e.g. an email that is already registered
    #[error("{field}: {message}")]
    Field { field: String, message: String },
    /// Not tied to any field
    #[error("{0}")]
    Form(String),
}

impl SubmitError {
    pub fn field(field: &str, message: &str) -> Self {
        Self::Field {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Receives a valid snapshot of a form's values
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitClientTrait: Send + Sync {
    /// Submit the values of the form named `form`
    async fn submit(&self, form: String, values: FormValues) -> Result<(), SubmitError>;
}
