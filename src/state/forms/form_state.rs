//! Form state and the validation/submission engine that owns it

use super::field::FieldSpec;
use super::rules::CrossFieldRule;
use crate::submit::SubmitError;
#[cfg(test)]
use crate::submit::SubmitClientTrait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared by all engines; attempt ids never repeat within a process
static NEXT_ATTEMPT: AtomicU64 = AtomicU64::new(1);

/// Snapshot of field values, keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// Current error message per failing field
pub type FieldErrors = BTreeMap<String, String>;

/// When field edits trigger re-validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Errors only change when a submit is attempted
    #[default]
    OnSubmit,
    /// Every edit re-validates the edited field and the fields that depend on it
    OnChange,
    /// Like `OnChange`, but only once the first submit has been attempted
    AfterFirstSubmit,
}

/// Mutable state of one form instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
    /// Submit failures that could not be attached to a declared field
    pub form_error: Option<String>,
    pub is_submitting: bool,
}

impl FormState {
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.form_error.is_some()
    }
}

/// Handed out when a submit starts; carries the snapshot the collaborator receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub attempt: u64,
    pub form: String,
    pub values: FormValues,
}

/// Result of a submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collaborator accepted the values
    Submitted,
    /// Local validation failed; the collaborator was not called
    Invalid(FieldErrors),
    /// The collaborator reported a failure
    Rejected(SubmitError),
    /// Another submit is already in flight; nothing happened
    Busy,
}

/// Owns a form's values and errors, validates them against declarative rules
/// and runs at most one submit at a time.
#[derive(Debug, Clone)]
pub struct FormEngine {
    name: String,
    fields: Vec<FieldSpec>,
    cross_rules: Vec<CrossFieldRule>,
    mode: ValidationMode,
    state: FormState,
    submit_attempted: bool,
    active_attempt: Option<u64>,
}

impl FormEngine {
    /// Create an engine with every field set to its default value
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Self {
        let values = fields
            .iter()
            .map(|f| (f.name.clone(), f.default_value.clone()))
            .collect();
        Self {
            name: name.to_string(),
            fields,
            cross_rules: Vec::new(),
            mode: ValidationMode::default(),
            state: FormState {
                values,
                ..FormState::default()
            },
            submit_attempted: false,
            active_attempt: None,
        }
    }

    pub fn with_cross_rule(mut self, rule: CrossFieldRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override default values for declared fields. Unknown names are ignored.
    pub fn with_defaults(mut self, defaults: &FormValues) -> Self {
        for field in &mut self.fields {
            if let Some(value) = defaults.get(&field.name) {
                field.default_value = value.clone();
                self.state.values.insert(field.name.clone(), value.clone());
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    /// Update one field's value. Errors are only touched when the validation
    /// mode asks for re-validation on change.
    pub fn set_field_value(&mut self, name: &str, value: impl Into<String>) {
        if self.field(name).is_none() {
            tracing::debug!("Ignoring edit to unknown field {name:?} on form {}", self.name);
            return;
        }
        self.state.values.insert(name.to_string(), value.into());

        let revalidate = match self.mode {
            ValidationMode::OnSubmit => false,
            ValidationMode::OnChange => true,
            ValidationMode::AfterFirstSubmit => self.submit_attempted,
        };
        if revalidate {
            for affected in self.affected_by(name) {
                let error = self.validate_field(&affected).map(str::to_string);
                match error {
                    Some(message) => {
                        self.state.errors.insert(affected, message);
                    }
                    None => {
                        self.state.errors.remove(&affected);
                    }
                }
            }
        }
    }

    /// The edited field plus every field whose cross-field rule reads it
    fn affected_by(&self, name: &str) -> Vec<String> {
        let mut affected = vec![name.to_string()];
        for rule in self.cross_rules.iter().filter(|r| r.depends_on(name)) {
            if !affected.contains(&rule.field) {
                affected.push(rule.field.clone());
            }
        }
        affected
    }

    /// First failing rule for one field: its own rules first, then cross-field rules
    pub fn validate_field(&self, name: &str) -> Option<&str> {
        let field = self.field(name)?;
        field.first_error(self.state.value(name)).or_else(|| {
            self.cross_rules
                .iter()
                .filter(|rule| rule.field == name)
                .find_map(|rule| rule.check(&self.state.values))
        })
    }

    /// Validate every declared field against the current values
    pub fn validate_all(&self) -> FieldErrors {
        self.fields
            .iter()
            .filter_map(|field| {
                self.validate_field(&field.name)
                    .map(|message| (field.name.clone(), message.to_string()))
            })
            .collect()
    }

    /// Start a submit: reject if one is in flight, validate, then mark the form
    /// as submitting and hand out a ticket with the value snapshot.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitOutcome> {
        if self.state.is_submitting {
            tracing::debug!("Submit ignored, form {} is already submitting", self.name);
            return Err(SubmitOutcome::Busy);
        }

        self.submit_attempted = true;
        self.state.form_error = None;
        let errors = self.validate_all();
        if !errors.is_empty() {
            tracing::debug!(
                "Form {} failed validation on {} field(s)",
                self.name,
                errors.len()
            );
            self.state.errors = errors.clone();
            return Err(SubmitOutcome::Invalid(errors));
        }

        self.state.errors.clear();
        self.state.is_submitting = true;
        let attempt = NEXT_ATTEMPT.fetch_add(1, Ordering::Relaxed);
        self.active_attempt = Some(attempt);
        tracing::debug!("Submitting form {} (attempt {attempt})", self.name);

        Ok(SubmitTicket {
            attempt,
            form: self.name.clone(),
            values: self.state.values.clone(),
        })
    }

    /// Apply a collaborator result. Returns `None` without touching state when
    /// `attempt` is no longer the active submit.
    pub fn finish_submit(
        &mut self,
        attempt: u64,
        result: Result<(), SubmitError>,
    ) -> Option<SubmitOutcome> {
        if self.active_attempt != Some(attempt) {
            tracing::debug!("Dropping stale completion for attempt {attempt} on form {}", self.name);
            return None;
        }
        Some(self.complete(result))
    }

    fn complete(&mut self, result: Result<(), SubmitError>) -> SubmitOutcome {
        self.active_attempt = None;
        self.state.is_submitting = false;

        match result {
            Ok(()) => {
                tracing::debug!("Form {} submitted", self.name);
                SubmitOutcome::Submitted
            }
            Err(err) => {
                tracing::debug!("Form {} rejected: {err}", self.name);
                match &err {
                    SubmitError::Field { field, message } if self.field(field).is_some() => {
                        self.state.errors.insert(field.clone(), message.clone());
                    }
                    SubmitError::Field { message, .. } | SubmitError::Form(message) => {
                        self.state.form_error = Some(message.clone());
                    }
                }
                SubmitOutcome::Rejected(err)
            }
        }
    }

    /// Abandon the active submit. Its completion, if it ever arrives, is dropped.
    pub fn cancel_submit(&mut self) -> bool {
        match self.active_attempt.take() {
            Some(attempt) => {
                self.state.is_submitting = false;
                tracing::debug!("Cancelled submit attempt {attempt} on form {}", self.name);
                true
            }
            None => false,
        }
    }

    /// Validate and submit through `client`, suspending until it completes.
    ///
    /// The UI never holds the engine across an await; it drives
    /// `begin_submit` and `finish_submit` from a spawned task instead.
    /// Dropping this future before the client answers cancels the attempt.
    #[cfg(test)]
    pub async fn submit<C>(&mut self, client: &C) -> SubmitOutcome
    where
        C: SubmitClientTrait + ?Sized,
    {
        let ticket = match self.begin_submit() {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let mut in_flight = InFlight {
            engine: self,
            attempt: ticket.attempt,
        };
        let result = client.submit(ticket.form, ticket.values).await;
        in_flight.engine.complete(result)
    }

    /// Restore defaults and drop errors and any active submit
    pub fn reset(&mut self) {
        self.cancel_submit();
        self.state = FormState {
            values: self
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.default_value.clone()))
                .collect(),
            ..FormState::default()
        };
        self.submit_attempted = false;
    }
}

/// Cancels its attempt on drop unless the attempt already completed
#[cfg(test)]
struct InFlight<'a> {
    engine: &'a mut FormEngine,
    attempt: u64,
}

#[cfg(test)]
impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.engine.active_attempt == Some(self.attempt) {
            self.engine.cancel_submit();
        }
    }
}
