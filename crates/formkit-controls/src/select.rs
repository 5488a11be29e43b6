//! Select box control for choosing a single option.

use crate::helpers::{create_select_box, RenderItem, SelectBoxOptions};
use formkit_core::{
    ChoiceControl, Disabled, FormError, Html, OptionEntry, OptionSet, Rule, Translator,
};
use formkit_yaml::{PromptConfig, SelectConfig};
use std::sync::Arc;

/// Select box control that allows single item selection.
///
/// Options may be flat or grouped. An optional prompt renders as a first,
/// empty-keyed option; without one, submitting no valid option is a
/// validation error.
#[derive(Debug)]
pub struct SelectBox {
    /// Value binding, allowed keys, disabled state and errors
    control: ChoiceControl,
    /// Options as configured, groups included
    options: OptionSet,
    /// Prompt label; `Some("")` is an empty prompt, `None` is no prompt
    prompt: Option<String>,
}

impl SelectBox {
    /// Create an empty select box with the given form name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            control: ChoiceControl::new(name),
            options: OptionSet::new(),
            prompt: None,
        }
    }

    /// Build a select box from manifest configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ValueOutOfSet`] when the configured default is
    /// not one of the options.
    pub fn from_config(config: &SelectConfig) -> Result<Self, FormError> {
        let mut select = Self::new(config.name.clone());
        select.set_options(config.items.clone(), config.use_keys);
        match &config.prompt {
            Some(PromptConfig::Label(label)) => {
                select.set_prompt(label.clone());
            }
            Some(PromptConfig::Flag(true)) => {
                #[allow(deprecated)]
                select.promote_first_option_to_prompt();
            }
            Some(PromptConfig::Flag(false)) | None => {}
        }

        let control = &mut select.control;
        if let Some(id) = &config.id {
            control.set_html_id(id.clone());
        }
        control.set_required(config.required);
        if let Some(message) = &config.required_message {
            control.messages_mut().set(Rule::Required, message.clone());
        }
        if let Some(message) = &config.valid_message {
            control.messages_mut().set(Rule::SelectBoxValid, message.clone());
        }
        control.set_disabled(Disabled::from(&config.disabled));
        for (name, value) in &config.attributes {
            control.set_attribute(name.clone(), value.clone());
        }
        control.set_value(config.default.as_deref())?;
        Ok(select)
    }

    /// Set options and option groups.
    ///
    /// With `use_keys` false every option is keyed by its own label. The
    /// flattened options become the allowed keys of the control.
    pub fn set_options(&mut self, items: OptionSet, use_keys: bool) -> &mut Self {
        let items = if use_keys {
            items
        } else {
            items.keyed_by_labels()
        };
        self.control.set_items(items.flatten());
        self.options = items;
        self
    }

    /// Options as configured, groups included.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Flattened `(key, label)` items.
    pub fn items(&self) -> &[(String, String)] {
        self.control.items()
    }

    /// Set the prompt shown as the first option. An empty label is still a
    /// prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> &mut Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Remove the prompt.
    pub fn clear_prompt(&mut self) -> &mut Self {
        self.prompt = None;
        self
    }

    /// Turn the first option into the prompt.
    ///
    /// The first flattened item is removed from the options and its label
    /// becomes the prompt. Option groups survive: only the promoted member
    /// leaves its group, and a group left empty is dropped. Without options
    /// there is nothing to promote and the control ends up without a prompt.
    #[deprecated(note = "pass the prompt label to `set_prompt` instead")]
    pub fn promote_first_option_to_prompt(&mut self) -> &mut Self {
        tracing::warn!(
            control = %self.control.name(),
            "SelectBox::promote_first_option_to_prompt() is deprecated; pass the prompt label to set_prompt()"
        );
        let Some((key, label)) = self.control.items().first().cloned() else {
            return self.clear_prompt();
        };
        let mut reduced = self.options.clone();
        reduced.remove_key(&key);
        self.set_options(reduced, true);
        self.set_prompt(label)
    }

    /// Prompt label, if a prompt is configured.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Assign a value from code.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ValueOutOfSet`] for keys that are not options.
    pub fn set_value(&mut self, value: Option<&str>) -> Result<&mut Self, FormError> {
        self.control.set_value(value)?;
        Ok(self)
    }

    /// Load the submitted key.
    pub fn load_http_data(&mut self, raw: Option<&str>) {
        self.control.load_http_data(raw);
    }

    /// Selected key when it is a valid option.
    pub fn value(&self) -> Option<&str> {
        self.control.value()
    }

    /// Label of the selected option.
    pub fn selected_item(&self) -> Option<&str> {
        self.control.selected_item()
    }

    /// Disable the whole control or individual keys.
    pub fn set_disabled(&mut self, disabled: impl Into<Disabled>) -> &mut Self {
        self.control.set_disabled(disabled);
        self
    }

    /// Mark the control as required.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.control.set_required(required);
        self
    }

    /// Install a translator for labels and the prompt.
    pub fn set_translator(&mut self, translator: Arc<dyn Translator>) -> &mut Self {
        self.control.set_translator(translator);
        self
    }

    /// Underlying choice control.
    pub fn control(&self) -> &ChoiceControl {
        &self.control
    }

    /// Mutable underlying choice control.
    pub fn control_mut(&mut self) -> &mut ChoiceControl {
        &mut self.control
    }

    /// Validation errors from the last [`SelectBox::validate`].
    pub fn errors(&self) -> &[String] {
        self.control.errors()
    }

    /// Check if the last validation failed.
    pub fn has_errors(&self) -> bool {
        self.control.has_errors()
    }

    /// Render the `<select>` element.
    pub fn render(&self) -> Html {
        let control = &self.control;
        let mut items = Vec::with_capacity(self.options.len() + 1);
        if let Some(prompt) = &self.prompt {
            items.push(RenderItem::option("", control.translate(prompt)));
        }
        for (key, entry) in self.options.iter() {
            items.push(match entry {
                OptionEntry::Flat(label) => RenderItem::option(key, control.translate(label)),
                OptionEntry::Group(members) => RenderItem::Group {
                    label: control.translate(key),
                    options: members
                        .iter()
                        .map(|(k, label)| (k.clone(), control.translate(label)))
                        .collect(),
                },
            });
        }

        let mut el = create_select_box(
            &items,
            &SelectBoxOptions {
                selected: control.raw_value(),
                disabled: control.disabled_keys(),
            },
        );
        el.add_attributes(control.control_attributes());
        el
    }

    /// Run generic rules, then require a valid option when there is no
    /// prompt to stand for "nothing selected".
    pub fn validate(&mut self) {
        self.control.validate();
        if !self.control.is_disabled() && self.prompt.is_none() && self.control.value().is_none()
        {
            self.control.add_rule_error(Rule::SelectBoxValid);
        }
    }
}
