//! Form field declarations

use super::rules::Rule;

/// Declares a single named input of a form: how it is labelled, what it starts
/// with, and which rules its value must pass
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub default_value: String,
    /// Checked in order; the first failing rule supplies the field's error
    pub rules: Vec<Rule>,
    /// Masked when rendered (passwords)
    pub secure: bool,
}

impl FieldSpec {
    /// Create a new text field with an empty default
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            default_value: String::new(),
            rules: Vec::new(),
            secure: false,
        }
    }

    /// Create a new masked field with an empty default
    pub fn secure(name: &str, label: &str) -> Self {
        Self {
            secure: true,
            ..Self::text(name, label)
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// First failing rule's message for `value`
    pub fn first_error(&self, value: &str) -> Option<&str> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &str) -> String {
        if self.secure {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let field = FieldSpec::text("email", "Email");
        assert_eq!(field.name, "email");
        assert_eq!(field.label, "Email");
        assert_eq!(field.default_value, "");
        assert!(field.rules.is_empty());
        assert!(!field.secure);
    }

    #[test]
    fn test_secure_masks_display_value() {
        let field = FieldSpec::secure("password", "Password");
        assert_eq!(field.display_value("abc"), "•••");
        assert_eq!(field.display_value(""), "");
    }

    #[test]
    fn test_plain_display_value() {
        let field = FieldSpec::text("email", "Email");
        assert_eq!(field.display_value("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let field = FieldSpec::text("age", "Age")
            .with_rule(Rule::digits("Age must be a number"))
            .with_rule(Rule::max_length(3, "Age must contain max of 3 digits"));
        assert_eq!(field.first_error("12a"), Some("Age must be a number"));
        assert_eq!(field.first_error("1234"), Some("Age must contain max of 3 digits"));
        assert_eq!(field.first_error("12345a"), Some("Age must be a number"));
        assert_eq!(field.first_error("123"), None);
    }

    #[test]
    fn test_field_without_rules_always_passes() {
        let field = FieldSpec::text("lastname", "Last name");
        assert_eq!(field.first_error(""), None);
    }
}
