//! Core types and traits for formkit form controls.
//!
//! This crate provides the pieces every control builds on:
//! - Markup: [`Html`] element trees with [`AttrValue`] attributes
//! - Options: [`OptionSet`] of flat options and groups, with flattening
//! - Translation: the [`Translator`] trait
//! - Validation: [`Validator`], [`Rule`] and the [`Messages`] catalogue
//! - Value binding: [`ChoiceControl`] with [`Disabled`] state

mod choice;
mod error;
mod html;
mod options;
mod translate;
pub mod validation;

pub use choice::{ChoiceControl, Disabled};
pub use error::FormError;
pub use html::{AttrValue, Html, Node};
pub use options::{OptionEntry, OptionSet};
pub use translate::{CatalogTranslator, IdentityTranslator, Translator};
pub use validation::{Custom, Messages, OneOf, Rule, ValidationResult, Validator};
