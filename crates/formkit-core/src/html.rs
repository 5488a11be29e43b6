//! HTML element builder used by form controls to produce markup.
//!
//! [`Html`] is a plain tree value: controls build it, callers render it
//! with [`std::fmt::Display`] or inspect it in tests.
//!
//! # Examples
//!
//! ```
//! use formkit_core::Html;
//!
//! let mut option = Html::el("option");
//! option.attr("value", "cz").bool_attr("selected", true).text("Czech & Slovak");
//! assert_eq!(
//!     option.to_string(),
//!     r#"<option value="cz" selected>Czech &amp; Slovak</option>"#
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    /// Ordinary `name="value"` attribute.
    Text(String),
    /// Boolean attribute: rendered bare when true, omitted when false.
    Bool(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Child of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Nested element.
    Element(Html),
    /// Escaped text content.
    Text(String),
}

/// An HTML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Html {
    name: String,
    attrs: Vec<(String, AttrValue)>,
    children: Vec<Node>,
}

impl Html {
    /// Create an empty element.
    #[must_use]
    pub fn el(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing an existing one of the same name.
    pub fn attr(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set a boolean attribute.
    pub fn bool_attr(&mut self, name: impl Into<String>, on: bool) -> &mut Self {
        self.attr(name, AttrValue::Bool(on))
    }

    /// Merge attributes; incoming values win over existing ones.
    pub fn add_attributes<I, K>(&mut self, attrs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, AttrValue)>,
        K: Into<String>,
    {
        for (name, value) in attrs {
            self.attr(name, value);
        }
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether the attribute renders (present and not `Bool(false)`).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        matches!(
            self.attribute(name),
            Some(AttrValue::Text(_) | AttrValue::Bool(true))
        )
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, AttrValue)] {
        &self.attrs
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: Self) -> &mut Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append text content.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Child nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of direct text children.
    #[must_use]
    pub fn inner_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

fn escape(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&#039;")?,
            _ => write!(f, "{c}")?,
        }
    }
    Ok(())
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            match value {
                AttrValue::Text(v) => {
                    write!(f, " {name}=\"")?;
                    escape(v, f)?;
                    f.write_str("\"")?;
                }
                AttrValue::Bool(true) => write!(f, " {name}")?,
                AttrValue::Bool(false) => {}
            }
        }
        f.write_str(">")?;
        for child in &self.children {
            match child {
                Node::Element(el) => write!(f, "{el}")?,
                Node::Text(t) => escape(t, f)?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}
