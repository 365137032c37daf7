//! Stand-in for a real backend: waits, logs the payload, and accepts it
//!
//! Addresses listed as taken are rejected with an error attributed to the
//! email field, which exercises the engine's failure path end to end.

use super::traits::{SubmitClientTrait, SubmitError};
use crate::config::FormsConfig;
use crate::state::FormValues;
use async_trait::async_trait;
use std::time::Duration;

/// Message attached to the email field when an address is already registered
const EMAIL_TAKEN: &str = "This email is already taken";

/// Simulated submit collaborator with a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedSubmitClient {
    delay: Duration,
    taken_emails: Vec<String>,
}

impl SimulatedSubmitClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            taken_emails: Vec::new(),
        }
    }

    pub fn from_config(config: &FormsConfig) -> Self {
        Self {
            taken_emails: config
                .taken_emails
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            ..Self::new(config.submit_delay())
        }
    }

    #[cfg(test)]
    fn with_taken_email(mut self, email: &str) -> Self {
        self.taken_emails.push(email.to_lowercase());
        self
    }

    fn is_taken(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.taken_emails.iter().any(|taken| *taken == email)
    }
}

/// Copy of the values safe to log
fn redacted(values: &FormValues) -> FormValues {
    values
        .iter()
        .map(|(name, value)| {
            if name.to_lowercase().contains("password") {
                (name.clone(), "***".to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

#[async_trait]
impl SubmitClientTrait for SimulatedSubmitClient {
    async fn submit(&self, form: String, values: FormValues) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;

        if let Some(email) = values.get("email").filter(|e| self.is_taken(e)) {
            tracing::debug!("Rejecting {form} submit, {email} is already taken");
            return Err(SubmitError::field("email", EMAIL_TAKEN));
        }

        let payload = serde_json::to_string(&redacted(&values))
            .map_err(|e| SubmitError::Form(format!("Failed to encode payload: {e}")))?;
        tracing::debug!("Received {form} submission: {payload}");
        Ok(())
    }
}
