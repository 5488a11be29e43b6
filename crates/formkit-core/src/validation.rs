//! Validation rules for form controls.
//!
//! This module provides:
//! - [`ValidationResult`] and the [`Validator`] trait for per-value rules
//! - Built-in validators ([`OneOf`], [`Custom`])
//! - [`Rule`] identifiers and the [`Messages`] catalogue that maps them to
//!   user-facing error text

use std::collections::HashMap;
use std::fmt;

/// Validation result for a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Validation passed.
    Valid,
    /// Validation failed with an error message.
    Invalid(String),
}

impl ValidationResult {
    /// Check if validation passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if validation failed.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Get the error message if invalid.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(msg) => Some(msg),
            Self::Valid => None,
        }
    }
}

/// A validator that checks a submitted, already resolved value.
pub trait Validator: Send + Sync {
    /// Validate the given value.
    fn validate(&self, value: &str) -> ValidationResult;

    /// Get the name of this validator.
    fn name(&self) -> &str;
}

/// Built-in rules with catalogued messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A value must be present.
    Required,
    /// The value must be one of a fixed list.
    OneOf,
    /// A select box without a prompt must have a valid option chosen.
    SelectBoxValid,
}

impl Rule {
    /// Stable rule identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Required => ":filled",
            Self::OneOf => ":isIn",
            Self::SelectBoxValid => ":selectBoxValid",
        }
    }

    /// Default user-facing message.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Required => "This field is required.",
            Self::OneOf => "Please select one of the allowed options.",
            Self::SelectBoxValid => "Please select a valid option.",
        }
    }
}

/// Message catalogue with per-rule overrides.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: HashMap<Rule, String>,
}

impl Messages {
    /// Create a catalogue with default messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the message for a rule.
    pub fn set(&mut self, rule: Rule, message: impl Into<String>) {
        self.overrides.insert(rule, message.into());
    }

    /// Message for a rule.
    pub fn get(&self, rule: Rule) -> &str {
        self.overrides
            .get(&rule)
            .map_or_else(|| rule.default_message(), String::as_str)
    }
}

/// Accepts only values from a fixed list.
#[derive(Debug, Clone)]
pub struct OneOf {
    allowed: Vec<String>,
    message: String,
}

impl OneOf {
    /// Create with the default message.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: Rule::OneOf.default_message().to_string(),
        }
    }

    /// Replace the error message.
    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }
}

impl Validator for OneOf {
    fn validate(&self, value: &str) -> ValidationResult {
        if self.allowed.iter().any(|a| a == value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.message.clone())
        }
    }

    fn name(&self) -> &'static str {
        "oneOf"
    }
}

/// Custom function validator.
pub struct Custom<F>
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    validator: F,
    name: String,
}

impl<F> Custom<F>
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    /// Create a custom validator.
    pub fn new(name: &str, validator: F) -> Self {
        Self {
            validator,
            name: name.to_string(),
        }
    }
}

impl<F> Validator for Custom<F>
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationResult {
        (self.validator)(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for Custom<F>
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish()
    }
}
