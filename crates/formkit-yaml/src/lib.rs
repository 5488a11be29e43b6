//! YAML/JSON manifest parser for formkit forms.

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{ControlConfig, DisabledConfig, FormManifest, PromptConfig, SelectConfig};
