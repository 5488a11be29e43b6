//! Choice control: the shared value/items/disabled/error machinery behind
//! every control that picks from a fixed set of keys.
//!
//! Controls embed a [`ChoiceControl`] and forward to it instead of
//! re-implementing value binding. Items are stored flat, as ordered
//! `(key, label)` pairs; grouping is the embedding control's business.

use crate::error::FormError;
use crate::html::AttrValue;
use crate::translate::{IdentityTranslator, Translator};
use crate::validation::{Messages, Rule, ValidationResult, Validator};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Disabled state of a choice control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Disabled {
    /// Nothing disabled.
    #[default]
    None,
    /// The whole control is disabled.
    All,
    /// Only the listed keys are disabled.
    Keys(BTreeSet<String>),
}

impl Disabled {
    /// Disable the given keys.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }

    /// Whether a specific key cannot be chosen.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Keys(keys) => keys.contains(key),
        }
    }
}

impl From<bool> for Disabled {
    fn from(disabled: bool) -> Self {
        if disabled {
            Self::All
        } else {
            Self::None
        }
    }
}

/// Value storage and generic validation for single-choice controls.
pub struct ChoiceControl {
    name: String,
    html_id: Option<String>,
    items: Vec<(String, String)>,
    value: Option<String>,
    disabled: Disabled,
    required: bool,
    rules: Vec<Box<dyn Validator>>,
    errors: Vec<String>,
    messages: Messages,
    translator: Arc<dyn Translator>,
    attrs: Vec<(String, AttrValue)>,
}

impl fmt::Debug for ChoiceControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoiceControl")
            .field("name", &self.name)
            .field("items", &self.items)
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("required", &self.required)
            .field("rule_count", &self.rules.len())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl ChoiceControl {
    /// Create an empty control with the given form name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html_id: None,
            items: Vec::new(),
            value: None,
            disabled: Disabled::None,
            required: false,
            rules: Vec::new(),
            errors: Vec::new(),
            messages: Messages::new(),
            translator: Arc::new(IdentityTranslator),
            attrs: Vec::new(),
        }
    }

    /// Form field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTML id; `frm-<name>` unless overridden.
    pub fn html_id(&self) -> String {
        self.html_id
            .clone()
            .unwrap_or_else(|| format!("frm-{}", self.name))
    }

    /// Override the HTML id.
    pub fn set_html_id(&mut self, id: impl Into<String>) {
        self.html_id = Some(id.into());
    }

    /// Replace the allowed items.
    pub fn set_items(&mut self, items: Vec<(String, String)>) {
        tracing::debug!(control = %self.name, count = items.len(), "choice items set");
        self.items = items;
    }

    /// Allowed items in order.
    pub fn items(&self) -> &[(String, String)] {
        &self.items
    }

    /// Check whether a key is one of the items.
    pub fn has_key(&self, key: &str) -> bool {
        self.items.iter().any(|(k, _)| k == key)
    }

    /// Assign a value from code. Keys outside the item set are rejected.
    pub fn set_value(&mut self, value: Option<&str>) -> Result<(), FormError> {
        match value {
            Some(v) if !self.has_key(v) => Err(FormError::ValueOutOfSet {
                name: self.name.clone(),
                value: v.to_string(),
                allowed: self
                    .items
                    .iter()
                    .map(|(k, _)| format!("'{k}'"))
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
            _ => {
                self.value = value.map(str::to_string);
                Ok(())
            }
        }
    }

    /// Load a submitted raw key.
    ///
    /// Unknown keys are kept as the raw value and resolve to no value;
    /// disabled keys are dropped. A fully disabled control ignores input.
    pub fn load_http_data(&mut self, raw: Option<&str>) {
        if self.is_disabled() {
            return;
        }
        self.value = raw
            .filter(|key| !self.disabled.contains(key))
            .map(str::to_string);
    }

    /// Raw stored key, whether or not it is a valid item.
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Resolved value: the stored key when it is an allowed item.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| self.has_key(v))
    }

    /// Label of the selected item.
    pub fn selected_item(&self) -> Option<&str> {
        let key = self.value()?;
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    /// Set disabled state for the whole control or for specific keys.
    pub fn set_disabled(&mut self, disabled: impl Into<Disabled>) {
        self.disabled = disabled.into();
    }

    /// Disabled state.
    pub fn disabled(&self) -> &Disabled {
        &self.disabled
    }

    /// True only when the whole control is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled == Disabled::All
    }

    /// Per-key disabled set, if one is configured.
    pub fn disabled_keys(&self) -> Option<&BTreeSet<String>> {
        match &self.disabled {
            Disabled::Keys(keys) => Some(keys),
            Disabled::None | Disabled::All => None,
        }
    }

    /// Mark the control as required.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Whether a value is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Add a rule run against the resolved value.
    pub fn add_rule<V: Validator + 'static>(&mut self, validator: V) {
        self.rules.push(Box::new(validator));
    }

    /// Message catalogue used by this control.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Mutable message catalogue.
    pub fn messages_mut(&mut self) -> &mut Messages {
        &mut self.messages
    }

    /// Install a translator. Messages pass through unchanged until one is set.
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) {
        self.translator = translator;
    }

    /// Translate a message with the installed translator.
    pub fn translate(&self, message: &str) -> String {
        self.translator.translate(message)
    }

    /// Record a validation error. Duplicates are ignored.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }

    /// Add the catalogued message for a rule.
    pub fn add_rule_error(&mut self, rule: Rule) {
        let message = self.messages.get(rule).to_string();
        tracing::debug!(control = %self.name, rule = rule.id(), "rule failed");
        self.add_error(message);
    }

    /// Accumulated errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check if any error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Remove all errors.
    pub fn clean_errors(&mut self) {
        self.errors.clear();
    }

    /// Run the generic rules. Previous errors are discarded.
    pub fn validate(&mut self) {
        self.clean_errors();
        if self.is_disabled() {
            return;
        }

        let failures: Vec<(String, String)> = match self.value() {
            None if self.required => vec![(
                Rule::Required.id().to_string(),
                self.messages.get(Rule::Required).to_string(),
            )],
            None => Vec::new(),
            Some(value) => self
                .rules
                .iter()
                .filter_map(|rule| match rule.validate(value) {
                    ValidationResult::Invalid(msg) => Some((rule.name().to_string(), msg)),
                    ValidationResult::Valid => None,
                })
                .collect(),
        };

        let failed: Vec<String> = failures.iter().map(|(rule, _)| rule.clone()).collect();
        for (_, message) in failures {
            self.add_error(message);
        }
        tracing::debug!(
            control = %self.name,
            errors = self.errors.len(),
            failed = ?failed,
            "choice validated"
        );
    }

    /// Set a custom HTML attribute rendered on the control element.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Attributes of the control element: name, id, required, disabled and
    /// custom attributes, in that order.
    pub fn control_attributes(&self) -> Vec<(String, AttrValue)> {
        let mut attrs = vec![
            ("name".to_string(), AttrValue::Text(self.name.clone())),
            ("id".to_string(), AttrValue::Text(self.html_id())),
        ];
        if self.required {
            attrs.push(("required".to_string(), AttrValue::Bool(true)));
        }
        if self.is_disabled() {
            attrs.push(("disabled".to_string(), AttrValue::Bool(true)));
        }
        attrs.extend(self.attrs.iter().cloned());
        attrs
    }
}
