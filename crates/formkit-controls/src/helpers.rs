//! Markup helpers shared by choice controls.

use formkit_core::Html;
use std::collections::BTreeSet;

/// One render-ready entry of a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderItem {
    /// A single `<option>`.
    Option {
        /// Submitted key
        key: String,
        /// Display label, already translated
        label: String,
    },
    /// An `<optgroup>` of `(key, label)` options.
    Group {
        /// Group label, already translated
        label: String,
        /// Member options
        options: Vec<(String, String)>,
    },
}

impl RenderItem {
    /// Create a single option entry.
    pub fn option(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Option {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Selection and disabled markers applied while rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectBoxOptions<'a> {
    /// Key marked `selected`
    pub selected: Option<&'a str>,
    /// Keys marked `disabled`
    pub disabled: Option<&'a BTreeSet<String>>,
}

fn option_element(key: &str, label: &str, options: &SelectBoxOptions<'_>) -> Html {
    let mut el = Html::el("option");
    el.attr("value", key);
    if options.selected == Some(key) {
        el.bool_attr("selected", true);
    }
    if options.disabled.is_some_and(|d| d.contains(key)) {
        el.bool_attr("disabled", true);
    }
    el.text(label);
    el
}

/// Build a `<select>` element from render items.
///
/// Groups only get a `label`; their disabled state is not derived from
/// their members.
pub fn create_select_box(items: &[RenderItem], options: &SelectBoxOptions<'_>) -> Html {
    let mut select = Html::el("select");
    for item in items {
        match item {
            RenderItem::Option { key, label } => {
                select.add_child(option_element(key, label, options));
            }
            RenderItem::Group {
                label,
                options: members,
            } => {
                let mut group = Html::el("optgroup");
                group.attr("label", label.as_str());
                for (key, member) in members {
                    group.add_child(option_element(key, member, options));
                }
                select.add_child(group);
            }
        }
    }
    select
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_select_box_empty() {
        let el = create_select_box(&[], &SelectBoxOptions::default());
        assert_eq!(el.to_string(), "<select></select>");
    }

    #[test]
    fn test_create_select_box_marks_selected() {
        let items = [RenderItem::option("a", "Apple"), RenderItem::option("b", "Banana")];
        let el = create_select_box(
            &items,
            &SelectBoxOptions {
                selected: Some("b"),
                disabled: None,
            },
        );
        assert_eq!(
            el.to_string(),
            r#"<select><option value="a">Apple</option><option value="b" selected>Banana</option></select>"#
        );
    }

    #[test]
    fn test_create_select_box_groups_and_disabled() {
        let disabled: BTreeSet<String> = ["de".to_string()].into();
        let items = [
            RenderItem::option("", "Choose"),
            RenderItem::Group {
                label: "Europe".to_string(),
                options: vec![
                    ("de".to_string(), "Germany".to_string()),
                    ("fr".to_string(), "France".to_string()),
                ],
            },
        ];
        let el = create_select_box(
            &items,
            &SelectBoxOptions {
                selected: Some("fr"),
                disabled: Some(&disabled),
            },
        );
        assert_eq!(
            el.to_string(),
            concat!(
                r#"<select><option value="">Choose</option>"#,
                r#"<optgroup label="Europe"><option value="de" disabled>Germany</option>"#,
                r#"<option value="fr" selected>France</option></optgroup></select>"#
            )
        );
    }

    #[test]
    fn test_create_select_box_group_not_disabled_by_members() {
        let disabled: BTreeSet<String> = ["x".to_string()].into();
        let items = [RenderItem::Group {
            label: "G".to_string(),
            options: vec![("x".to_string(), "X".to_string())],
        }];
        let el = create_select_box(
            &items,
            &SelectBoxOptions {
                selected: None,
                disabled: Some(&disabled),
            },
        );
        let group = el.elements().next().unwrap();
        assert!(!group.has_attribute("disabled"));
    }
}
