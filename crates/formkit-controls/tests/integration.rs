//! Integration tests for formkit-controls.
//!
//! Configure, submit, validate and render select boxes through the public
//! API only.

use formkit_controls::SelectBox;
use formkit_core::{CatalogTranslator, Disabled, OptionEntry, OptionSet, Rule};
use proptest::prelude::*;
use std::sync::Arc;

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_empty_options_render_nothing() {
    let mut select = SelectBox::new("empty");
    select.set_options(OptionSet::new(), true);
    assert_eq!(select.render().elements().count(), 0);
    assert!(select.items().is_empty());
}

#[test]
fn test_prompt_renders_first_and_validates() {
    let mut select = SelectBox::new("fruit");
    select.set_options(OptionSet::from_flat([("a", "Apple"), ("b", "Banana")]), true);
    select.set_prompt("Choose…");

    let html = select.render().to_string();
    assert!(html.starts_with(r#"<select name="fruit" id="frm-fruit"><option value="">Choose…</option>"#));

    select.load_http_data(None);
    select.validate();
    assert!(!select.has_errors());
}

#[test]
fn test_no_prompt_unset_value_fails_once() {
    let mut select = SelectBox::new("fruit");
    select.set_options(OptionSet::from_flat([("a", "Apple")]), true);
    select.validate();
    assert_eq!(select.errors(), [Rule::SelectBoxValid.default_message()]);

    select.set_disabled(true);
    select.validate();
    assert!(!select.has_errors());
}

#[test]
fn test_reconfigure_after_validation() {
    let mut select = SelectBox::new("fruit");
    select.set_options(OptionSet::from_flat([("a", "Apple")]), true);
    select.load_http_data(Some("b"));
    select.validate();
    assert!(select.has_errors());

    select.set_options(OptionSet::from_flat([("a", "Apple"), ("b", "Banana")]), true);
    select.validate();
    assert!(!select.has_errors());
    assert_eq!(select.selected_item(), Some("Banana"));
}

#[test]
fn test_grouped_submission_translated_render() {
    let mut select = SelectBox::new("country");
    select
        .set_options(
            OptionSet::new()
                .with_option("cz", "Czech Republic")
                .with_group("Europe", [("de", "Germany"), ("fr", "France")]),
            true,
        )
        .set_disabled(Disabled::keys(["fr"]))
        .set_translator(Arc::new(CatalogTranslator::new().with("Germany", "Deutschland")));

    select.load_http_data(Some("fr"));
    assert_eq!(select.value(), None);
    select.load_http_data(Some("de"));
    assert_eq!(select.value(), Some("de"));

    let html = select.render().to_string();
    assert!(html.contains(r#"<option value="de" selected>Deutschland</option>"#));
    assert!(html.contains(r#"<option value="fr" disabled>France</option>"#));
}

#[test]
fn test_values_as_keys() {
    let mut select = SelectBox::new("color");
    select.set_options(OptionSet::from_flat([("1", "Red"), ("2", "Green")]), false);
    let keys: Vec<&str> = select.items().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["Red", "Green"]);
    let stored: Vec<&str> = select.options().iter().map(|(k, _)| k).collect();
    assert_eq!(stored, ["Red", "Green"]);
}

// =============================================================================
// Properties
// =============================================================================

fn flat_options() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::btree_map("[a-z]{1,5}", "[A-Z][a-z]{0,7}", 0..15)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #[test]
    fn property_flat_items_match_stored(options in flat_options()) {
        let mut select = SelectBox::new("s");
        select.set_options(OptionSet::from_flat(options.clone()), true);
        prop_assert_eq!(select.items(), options.as_slice());
        prop_assert_eq!(select.render().elements().count(), options.len());
    }

    #[test]
    fn property_prompt_never_fails_validation(options in flat_options(), prompt in ".{0,10}") {
        let mut select = SelectBox::new("s");
        select.set_options(OptionSet::from_flat(options), true);
        select.set_prompt(prompt);
        select.validate();
        prop_assert!(!select.has_errors());
    }

    #[test]
    fn property_values_as_keys_keys_equal_labels(options in flat_options()) {
        let mut select = SelectBox::new("s");
        select.set_options(OptionSet::from_flat(options), false);
        for (key, entry) in select.options().iter() {
            prop_assert_eq!(entry, &OptionEntry::Flat(key.to_string()));
        }
        for (key, label) in select.items() {
            prop_assert_eq!(key, label);
        }
    }
}
