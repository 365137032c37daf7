//! Validation rules for form fields

use super::FormValues;
use regex::Regex;
use std::sync::LazyLock;

/// Same grammar as zod's `email()`. The `regex` crate has no lookaround, so the
/// leading-dot and double-dot restrictions live in `is_email`.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern is valid"));

fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_REGEX.is_match(value)
}

/// The kind of check a single-value rule performs
#[derive(Debug, Clone)]
pub enum RuleKind {
    Email,
    MinLength(usize),
    MaxLength(usize),
    /// One or more ASCII digits
    Digits,
    Pattern(Regex),
}

/// A pure predicate over one field's value, paired with the message shown when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: String,
}

impl Rule {
    pub fn email(message: &str) -> Self {
        Self::new(RuleKind::Email, message)
    }

    pub fn min_length(min: usize, message: &str) -> Self {
        Self::new(RuleKind::MinLength(min), message)
    }

    pub fn max_length(max: usize, message: &str) -> Self {
        Self::new(RuleKind::MaxLength(max), message)
    }

    pub fn digits(message: &str) -> Self {
        Self::new(RuleKind::Digits, message)
    }

    /// Create a rule from a compiled regex. Anchors are the caller's responsibility.
    pub fn matching(regex: Regex, message: &str) -> Self {
        Self::new(RuleKind::Pattern(regex), message)
    }

    fn new(kind: RuleKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    /// Returns true if the value passes this rule
    pub fn passes(&self, value: &str) -> bool {
        match &self.kind {
            RuleKind::Email => is_email(value),
            RuleKind::MinLength(min) => value.chars().count() >= *min,
            RuleKind::MaxLength(max) => value.chars().count() <= *max,
            RuleKind::Digits => DIGITS_REGEX.is_match(value),
            RuleKind::Pattern(re) => re.is_match(value),
        }
    }

    /// Check the value, returning the failure message if it does not pass
    pub fn check(&self, value: &str) -> Option<&str> {
        if self.passes(value) {
            None
        } else {
            Some(&self.message)
        }
    }
}

/// A rule that compares one field against another field's current value
#[derive(Debug, Clone)]
pub struct CrossFieldRule {
    /// Field the error is attached to
    pub field: String,
    /// Field whose value must be matched
    pub other: String,
    pub message: String,
}

impl CrossFieldRule {
    /// `field` must equal `other`
    pub fn equals(field: &str, other: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            other: other.to_string(),
            message: message.to_string(),
        }
    }

    /// Check against the full value snapshot. Missing fields read as empty.
    pub fn check(&self, values: &FormValues) -> Option<&str> {
        let value = values.get(&self.field).map(String::as_str).unwrap_or("");
        let other = values.get(&self.other).map(String::as_str).unwrap_or("");
        if value == other {
            None
        } else {
            Some(&self.message)
        }
    }

    /// Whether an edit to `name` can change this rule's outcome
    pub fn depends_on(&self, name: &str) -> bool {
        self.field == name || self.other == name
    }
}
