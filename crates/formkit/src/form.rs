//! Forms assembled from manifests.

use formkit_controls::SelectBox;
use formkit_core::{FormError, Html, Translator};
use formkit_yaml::{ControlConfig, FormManifest};
use std::collections::HashMap;
use std::sync::Arc;

/// A named group of controls loaded and validated together.
#[derive(Debug)]
pub struct Form {
    name: String,
    controls: Vec<SelectBox>,
}

impl Form {
    /// Create an empty form.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controls: Vec::new(),
        }
    }

    /// Build every control of a manifest, sharing the manifest's translator.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] when a control's default is not one of its
    /// options.
    pub fn from_manifest(manifest: &FormManifest) -> Result<Self, FormError> {
        let translator: Arc<dyn Translator> = Arc::new(manifest.translator());
        let mut form = Self::new(manifest.name.clone());
        for config in &manifest.controls {
            let mut control = match config {
                ControlConfig::Select(select) => SelectBox::from_config(select)?,
            };
            control.set_translator(Arc::clone(&translator));
            form.add(control);
        }
        Ok(form)
    }

    /// Form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a control.
    pub fn add(&mut self, control: SelectBox) -> &mut Self {
        self.controls.push(control);
        self
    }

    /// Controls in order.
    pub fn controls(&self) -> &[SelectBox] {
        &self.controls
    }

    /// Find a control by name.
    pub fn control(&self, name: &str) -> Option<&SelectBox> {
        self.controls.iter().find(|c| c.control().name() == name)
    }

    /// Find a control by name, mutably.
    pub fn control_mut(&mut self, name: &str) -> Option<&mut SelectBox> {
        self.controls.iter_mut().find(|c| c.control().name() == name)
    }

    /// Load submitted data; controls missing from `data` receive no value.
    pub fn load_http_data(&mut self, data: &HashMap<String, String>) {
        for control in &mut self.controls {
            let raw = data.get(control.control().name()).map(String::as_str);
            control.load_http_data(raw);
        }
    }

    /// Validate every control; true when none has errors.
    pub fn validate(&mut self) -> bool {
        for control in &mut self.controls {
            control.validate();
        }
        let valid = !self.has_errors();
        tracing::debug!(form = %self.name, valid, "form validated");
        valid
    }

    /// Check if any control has errors.
    pub fn has_errors(&self) -> bool {
        self.controls.iter().any(SelectBox::has_errors)
    }

    /// Errors keyed by control name, skipping controls without errors.
    pub fn errors(&self) -> Vec<(&str, &[String])> {
        self.controls
            .iter()
            .filter(|c| c.has_errors())
            .map(|c| (c.control().name(), c.errors()))
            .collect()
    }

    /// Render the `<form>` element with every control.
    pub fn render(&self) -> Html {
        let mut form = Html::el("form");
        form.attr("id", format!("frm-{}", self.name))
            .attr("method", "post");
        for control in &self.controls {
            form.add_child(control.render());
        }
        form
    }
}
