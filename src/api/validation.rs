//! Field-level validation for decoded request bodies

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// One `@`, no whitespace, and a dotted domain with no empty labels
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$").expect("Invalid regex pattern - this is a bug in the codebase")
});

/// Constraint a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    /// Must be strictly later than the named field
    After(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "{} is required", self.field),
            Rule::Email => write!(f, "{} must be a valid email address", self.field),
            Rule::MinLength(n) => write!(f, "{} must be at least {} characters long", self.field, n),
            Rule::MaxLength(n) => write!(f, "{} must be at most {} characters long", self.field, n),
            Rule::After(other) => write!(f, "{} must be after {}", self.field, other),
        }
    }
}

/// Ordered list of failed field rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, rule: Rule) {
        self.0.push(FieldError { field, rule });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for the first failure, if any
    pub fn first_message(&self) -> Option<String> {
        self.0.first().map(ToString::to_string)
    }

    /// Non-blank check. Returns whether the value passed so callers can skip
    /// follow-up rules on a missing field.
    pub fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, Rule::Required);
            return false;
        }
        true
    }

    /// Presence check for optional fields, same contract as [`Self::required`]
    pub fn present<T>(&mut self, field: &'static str, value: &Option<T>) -> bool {
        if value.is_none() {
            self.push(field, Rule::Required);
            return false;
        }
        true
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !is_email(value) {
            self.push(field, Rule::Email);
        }
    }

    pub fn min_length(&mut self, field: &'static str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.push(field, Rule::MinLength(min));
        }
    }

    pub fn max_length(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(field, Rule::MaxLength(max));
        }
    }

    /// `value` must be strictly greater than `other`
    pub fn after<T: PartialOrd>(&mut self, field: &'static str, value: &T, other_field: &'static str, other: &T) {
        if value <= other {
            self.push(field, Rule::After(other_field));
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Struct-level rules run after a body decodes
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_skips_blank_values() {
        let mut errors = ValidationErrors::new();
        assert!(!errors.required("name", "   "));
        assert!(errors.required("email", "a@b.co"));
        assert_eq!(errors.errors(), &[FieldError { field: "name", rule: Rule::Required }]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("jane@example.com"));
        assert!(is_email("j.doe+rota@mail.example.org"));
        assert!(!is_email("jane"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("jane@localhost"));
        assert!(!is_email("jane@example..com"));
        assert!(!is_email("ja ne@example.com"));
        assert!(!is_email("a@b@example.com"));
        assert!(!is_email("jane@.example.com"));
        assert!(!is_email("jane@example.com."));
    }

    #[test]
    fn test_length_rules_count_chars() {
        let mut errors = ValidationErrors::new();
        errors.min_length("password", "ééé", 4);
        errors.max_length("username", "ééé", 3);
        assert_eq!(errors.first_message().unwrap(), "password must be at least 4 characters long");
        assert_eq!(errors.errors().len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.push("email", Rule::Email);
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "email must be a valid email address");
    }

    #[test]
    fn test_presence_and_ordering() {
        let mut errors = ValidationErrors::new();
        assert!(!errors.present::<i32>("start_time", &None));
        assert!(errors.present("end_time", &Some(3)));
        errors.after("end_time", &3, "start_time", &3);
        errors.after("end_time", &4, "start_time", &3);

        let messages: Vec<String> = errors.errors().iter().map(ToString::to_string).collect();
        assert_eq!(messages, vec!["start_time is required", "end_time must be after start_time"]);
    }
}
