//! Form manifest types: declarative control configuration loaded from YAML
//! or JSON.

use crate::error::ParseError;
use formkit_core::{CatalogTranslator, Disabled, OptionSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Form manifest loaded from `form.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormManifest {
    /// Form name
    pub name: String,
    /// Message translations shared by every control
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    /// Controls in render order
    #[serde(default)]
    pub controls: Vec<ControlConfig>,
}

/// Configuration of one control, discriminated by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlConfig {
    /// Single-choice select box
    Select(SelectConfig),
}

impl ControlConfig {
    /// Control name.
    pub fn name(&self) -> &str {
        match self {
            Self::Select(c) => &c.name,
        }
    }
}

/// Prompt setting of a select box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptConfig {
    /// `false` means no prompt; `true` is the deprecated "promote the first
    /// option" form.
    Flag(bool),
    /// Prompt label.
    Label(String),
}

/// Disabled setting: the whole control or a list of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisabledConfig {
    /// Whole control
    Flag(bool),
    /// Individual keys
    Keys(Vec<String>),
}

impl Default for DisabledConfig {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl From<&DisabledConfig> for Disabled {
    fn from(config: &DisabledConfig) -> Self {
        match config {
            DisabledConfig::Flag(flag) => Self::from(*flag),
            DisabledConfig::Keys(keys) => Self::keys(keys.iter().cloned()),
        }
    }
}

/// Select box configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Form field name
    pub name: String,
    /// HTML id override
    #[serde(default)]
    pub id: Option<String>,
    /// Prompt label, or a legacy flag
    #[serde(default)]
    pub prompt: Option<PromptConfig>,
    /// When false, options are keyed by their labels
    #[serde(default = "default_use_keys")]
    pub use_keys: bool,
    /// Whether a value is required
    #[serde(default)]
    pub required: bool,
    /// Override for the required message
    #[serde(default)]
    pub required_message: Option<String>,
    /// Override for the "select a valid option" message
    #[serde(default)]
    pub valid_message: Option<String>,
    /// Disabled state
    #[serde(default)]
    pub disabled: DisabledConfig,
    /// Default selected key
    #[serde(default)]
    pub default: Option<String>,
    /// Extra HTML attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Options and option groups
    #[serde(default)]
    pub items: OptionSet,
}

fn default_use_keys() -> bool {
    true
}

impl SelectConfig {
    /// Options after applying `use_keys`.
    pub fn effective_items(&self) -> OptionSet {
        if self.use_keys {
            self.items.clone()
        } else {
            self.items.keyed_by_labels()
        }
    }

    fn check(&self) -> Result<(), ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::MissingField("name".to_string()));
        }
        if let Some(default) = &self.default {
            let mut items = self.effective_items().flatten();
            if self.prompt == Some(PromptConfig::Flag(true)) && !items.is_empty() {
                // the first option becomes the prompt
                items.remove(0);
            }
            if !items.iter().any(|(k, _)| k == default) {
                return Err(ParseError::InvalidValue {
                    field: format!("{}.default", self.name),
                    message: format!("'{default}' is not one of the items"),
                });
            }
        }
        Ok(())
    }
}

impl FormManifest {
    /// Parse a manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or the manifest fails
    /// [`FormManifest::validate`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.validate()?;
        tracing::debug!(form = %manifest.name, controls = manifest.controls.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Parse a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the manifest fails
    /// [`FormManifest::validate`].
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        tracing::debug!(form = %manifest.name, controls = manifest.controls.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Serialize manifest to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check names are present and unique and defaults are valid keys.
    pub fn validate(&self) -> Result<(), ParseError> {
        let mut seen = HashSet::new();
        for control in &self.controls {
            match control {
                ControlConfig::Select(c) => c.check()?,
            }
            if !seen.insert(control.name()) {
                return Err(ParseError::Validation(format!(
                    "duplicate control '{}'",
                    control.name()
                )));
            }
        }
        Ok(())
    }

    /// Look up a select box configuration by name.
    pub fn select(&self, name: &str) -> Option<&SelectConfig> {
        self.controls.iter().find_map(|c| match c {
            ControlConfig::Select(s) if s.name == name => Some(s),
            ControlConfig::Select(_) => None,
        })
    }

    /// Translator built from the manifest's translations.
    pub fn translator(&self) -> CatalogTranslator {
        self.translations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_core::{OptionEntry, Translator};

    const EXAMPLE_YAML: &str = r#"
name: order
translations:
  Choose a country: Vyberte zemi
controls:
  - type: select
    name: country
    prompt: Choose a country
    required: true
    disabled: [us]
    items:
      cz: Czech Republic
      Europe:
        de: Germany
        fr: France
      us: United States
  - type: select
    name: color
    use_keys: false
    default: Green
    items:
      1: Red
      2: Green
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = FormManifest::from_yaml(EXAMPLE_YAML).unwrap();
        assert_eq!(manifest.name, "order");
        assert_eq!(manifest.controls.len(), 2);
        assert_eq!(manifest.controls[0].name(), "country");
    }

    #[test]
    fn test_parse_select_config() {
        let manifest = FormManifest::from_yaml(EXAMPLE_YAML).unwrap();
        let country = manifest.select("country").unwrap();
        assert_eq!(
            country.prompt,
            Some(PromptConfig::Label("Choose a country".to_string()))
        );
        assert!(country.use_keys);
        assert!(country.required);
        assert_eq!(country.disabled, DisabledConfig::Keys(vec!["us".to_string()]));
        assert_eq!(country.items.len(), 3);
        assert!(matches!(
            country.items.iter().nth(1),
            Some(("Europe", OptionEntry::Group(members))) if members.len() == 2
        ));
    }

    #[test]
    fn test_effective_items_keyed_by_labels() {
        let manifest = FormManifest::from_yaml(EXAMPLE_YAML).unwrap();
        let color = manifest.select("color").unwrap();
        let keys: Vec<String> = color
            .effective_items()
            .flatten()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, ["Red", "Green"]);
    }

    #[test]
    fn test_disabled_config_conversion() {
        assert_eq!(Disabled::from(&DisabledConfig::Flag(true)), Disabled::All);
        assert_eq!(Disabled::from(&DisabledConfig::default()), Disabled::None);
        assert_eq!(
            Disabled::from(&DisabledConfig::Keys(vec!["a".to_string()])),
            Disabled::keys(["a"])
        );
    }

    #[test]
    fn test_prompt_flag_parses() {
        let yaml = "name: f\ncontrols:\n  - type: select\n    name: s\n    prompt: true\n";
        let manifest = FormManifest::from_yaml(yaml).unwrap();
        assert_eq!(manifest.select("s").unwrap().prompt, Some(PromptConfig::Flag(true)));
    }

    #[test]
    fn test_duplicate_control_rejected() {
        let yaml = "name: f\ncontrols:\n  - {type: select, name: a}\n  - {type: select, name: a}\n";
        let err = FormManifest::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ParseError::Validation(_)));
    }

    #[test]
    fn test_missing_name_rejected() {
        let yaml = "name: f\ncontrols:\n  - {type: select, name: ''}\n";
        let err = FormManifest::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "name"));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let yaml = "name: f\ncontrols:\n  - {type: select, name: a, default: z, items: {x: X}}\n";
        let err = FormManifest::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_control_type_rejected() {
        let yaml = "name: f\ncontrols:\n  - {type: slider, name: a}\n";
        assert!(matches!(
            FormManifest::from_yaml(yaml),
            Err(ParseError::Yaml(_))
        ));
    }

    #[test]
    fn test_translator_from_manifest() {
        let manifest = FormManifest::from_yaml(EXAMPLE_YAML).unwrap();
        let t = manifest.translator();
        assert_eq!(t.translate("Choose a country"), "Vyberte zemi");
    }

    #[test]
    fn test_json_manifest() {
        let json = r#"{"name":"f","controls":[{"type":"select","name":"s","items":{"a":"A"}}]}"#;
        let manifest = FormManifest::from_json(json).unwrap();
        assert_eq!(manifest.select("s").unwrap().items.len(), 1);
    }

    #[test]
    fn test_manifest_yaml_roundtrip_keeps_items() {
        let manifest = FormManifest::from_yaml(EXAMPLE_YAML).unwrap();
        let yaml = manifest.to_yaml().unwrap();
        let again = FormManifest::from_yaml(&yaml).unwrap();
        assert_eq!(
            again.select("country").unwrap().items,
            manifest.select("country").unwrap().items
        );
    }

    #[test]
    fn test_default_cannot_be_promoted_prompt() {
        let yaml = "name: f\ncontrols:\n  - {type: select, name: s, prompt: true, default: a, items: {a: A, b: B}}\n";
        assert!(matches!(
            FormManifest::from_yaml(yaml),
            Err(ParseError::InvalidValue { .. })
        ));

        let yaml = "name: f\ncontrols:\n  - {type: select, name: s, prompt: true, default: b, items: {a: A, b: B}}\n";
        assert!(FormManifest::from_yaml(yaml).is_ok());
    }
}
