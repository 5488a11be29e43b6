//! Label translation.

use std::collections::HashMap;

/// Rewrites user-facing messages, typically for localization.
pub trait Translator: Send + Sync {
    /// Translate a message. Unknown messages should be returned unchanged.
    fn translate(&self, message: &str) -> String;
}

/// Translator that returns every message unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, message: &str) -> String {
        message.to_string()
    }
}

/// Dictionary-backed translator.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation.
    #[must_use]
    pub fn with(mut self, message: &str, translation: &str) -> Self {
        self.insert(message, translation);
        self
    }

    /// Insert a translation.
    pub fn insert(&mut self, message: &str, translation: &str) {
        self.entries
            .insert(message.to_string(), translation.to_string());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CatalogTranslator {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, message: &str) -> String {
        self.entries
            .get(message)
            .cloned()
            .unwrap_or_else(|| message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_translator() {
        assert_eq!(IdentityTranslator.translate("Apple"), "Apple");
    }

    #[test]
    fn test_catalog_translator_hit_and_miss() {
        let t = CatalogTranslator::new().with("Apple", "Jablko");
        assert_eq!(t.translate("Apple"), "Jablko");
        assert_eq!(t.translate("Pear"), "Pear");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_catalog_from_iter() {
        let t: CatalogTranslator = [("a", "A"), ("b", "B")].into_iter().collect();
        assert_eq!(t.translate("b"), "B");
        assert!(!t.is_empty());
    }
}
