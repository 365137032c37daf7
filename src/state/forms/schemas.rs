//! The concrete forms offered by the app

use super::field::FieldSpec;
use super::form_state::{FormEngine, FormValues, ValidationMode};
use super::rules::{CrossFieldRule, Rule};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Ten digits, starting with 6-9
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern is valid"));

const INVALID_EMAIL: &str = "Invalid email address";
const SHORT_PASSWORD: &str = "Password must be at least 8 characters";

/// Which form is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Email and password, email prefilled
    #[default]
    Login,
    /// Email and password, both blank
    Register,
    /// Full profile with password confirmation
    Signup,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Login, FormKind::Register, FormKind::Signup];

    pub fn next(&self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Signup => "signup",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Register => "Register",
            Self::Signup => "Sign up",
        }
    }

    /// Build a fresh engine for this form
    pub fn build(&self, mode: ValidationMode) -> FormEngine {
        let engine = match self {
            Self::Login => FormEngine::new(self.id(), vec![email_field(), password_field()])
                .with_defaults(&FormValues::from([(
                    "email".to_string(),
                    "test@gmail.com".to_string(),
                )])),
            Self::Register => FormEngine::new(self.id(), vec![email_field(), password_field()]),
            Self::Signup => FormEngine::new(
                self.id(),
                vec![
                    FieldSpec::text("firstname", "First name")
                        .with_rule(Rule::min_length(3, "First name is required")),
                    FieldSpec::text("lastname", "Last name"),
                    FieldSpec::text("age", "Age")
                        .with_rule(Rule::digits("Age must be a number"))
                        .with_rule(Rule::max_length(3, "Age must contain max of 3 digits")),
                    FieldSpec::text("phone", "Phone").with_rule(Rule::matching(
                        PHONE_REGEX.clone(),
                        "Enter a valid contact number",
                    )),
                    email_field(),
                    password_field(),
                    FieldSpec::secure("confirmPassword", "Confirm password"),
                ],
            )
            .with_cross_rule(CrossFieldRule::equals(
                "confirmPassword",
                "password",
                "Passwords do not match",
            )),
        };
        engine.with_mode(mode)
    }
}

fn email_field() -> FieldSpec {
    FieldSpec::text("email", "Email").with_rule(Rule::email(INVALID_EMAIL))
}

fn password_field() -> FieldSpec {
    FieldSpec::secure("password", "Password").with_rule(Rule::min_length(8, SHORT_PASSWORD))
}
