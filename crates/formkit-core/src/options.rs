//! Ordered option sets for choice controls.
//!
//! An [`OptionSet`] maps keys to either a flat label or a group of
//! `(key, label)` members. Order is insertion order. Inserting an existing
//! key replaces the entry in place.
//!
//! Option sets deserialize from YAML/JSON mappings: scalar values become
//! flat options, nested mappings become groups. Scalar keys and labels of
//! any type are taken by their string form, and sequences are keyed by
//! position.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One top-level entry of an [`OptionSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionEntry {
    /// A selectable option with a display label.
    Flat(String),
    /// A labelled group of selectable `(key, label)` members.
    Group(Vec<(String, String)>),
}

/// Ordered mapping from key to [`OptionEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionSet {
    entries: Vec<(String, OptionEntry)>,
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

impl OptionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set of flat options.
    pub fn from_flat<I, K, L>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        let mut set = Self::new();
        for (key, label) in items {
            set.insert_flat(key, label);
        }
        set
    }

    /// Add a flat option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert_flat(key, label);
        self
    }

    /// Add a group.
    #[must_use]
    pub fn with_group<I, K, L>(mut self, label: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        self.insert_group(label, members);
        self
    }

    /// Insert a flat option.
    pub fn insert_flat(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.insert(key, OptionEntry::Flat(label.into()));
    }

    /// Insert a group; duplicate member keys keep the last label.
    pub fn insert_group<I, K, L>(&mut self, label: impl Into<String>, members: I)
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        let mut group = Vec::new();
        for (key, member) in members {
            upsert(&mut group, key.into(), member.into());
        }
        self.insert(label, OptionEntry::Group(group));
    }

    /// Insert an entry, replacing an existing one with the same key.
    pub fn insert(&mut self, key: impl Into<String>, entry: OptionEntry) {
        upsert(&mut self.entries, key.into(), entry);
    }

    /// Entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collapse groups into one level of `(key, label)` pairs.
    ///
    /// A key seen twice keeps its first position and its last label.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut flat = Vec::new();
        for (key, entry) in &self.entries {
            match entry {
                OptionEntry::Flat(label) => upsert(&mut flat, key.clone(), label.clone()),
                OptionEntry::Group(members) => {
                    for (k, label) in members {
                        upsert(&mut flat, k.clone(), label.clone());
                    }
                }
            }
        }
        flat
    }

    /// First selectable `(key, label)` pair in flattened order.
    pub fn first_item(&self) -> Option<(String, String)> {
        self.flatten().into_iter().next()
    }

    /// Remove a selectable key, top-level or inside a group, and return its
    /// label. A group left without members is dropped.
    pub fn remove_key(&mut self, key: &str) -> Option<String> {
        if let Some(pos) = self
            .entries
            .iter()
            .position(|(k, e)| k == key && matches!(e, OptionEntry::Flat(_)))
        {
            return match self.entries.remove(pos).1 {
                OptionEntry::Flat(label) => Some(label),
                OptionEntry::Group(_) => None,
            };
        }

        let (pos, label) = self.entries.iter_mut().enumerate().find_map(|(i, (_, e))| {
            let OptionEntry::Group(members) = e else {
                return None;
            };
            let at = members.iter().position(|(k, _)| k == key)?;
            Some((i, members.remove(at).1))
        })?;
        if matches!(&self.entries[pos].1, OptionEntry::Group(m) if m.is_empty()) {
            self.entries.remove(pos);
        }
        Some(label)
    }

    /// Re-key every option by its label.
    ///
    /// Flat options get their label as key; group members likewise, while
    /// group keys stay. Colliding labels collapse into one option.
    #[must_use]
    pub fn keyed_by_labels(&self) -> Self {
        let mut set = Self::new();
        for (key, entry) in &self.entries {
            match entry {
                OptionEntry::Flat(label) => set.insert_flat(label.clone(), label.clone()),
                OptionEntry::Group(members) => set.insert_group(
                    key.clone(),
                    members.iter().map(|(_, l)| (l.clone(), l.clone())),
                ),
            }
        }
        set
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for OptionSet {
    fn from_iter<T: IntoIterator<Item = (K, L)>>(iter: T) -> Self {
        Self::from_flat(iter)
    }
}

// =============================================================================
// Serde
// =============================================================================

/// Any scalar, kept as its string form.
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(if v { "1" } else { "" }.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Group members: a mapping of scalars, or a sequence keyed by position.
struct Members(Vec<(String, String)>);

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping or sequence of option labels")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Members, A::Error> {
                let mut members = Vec::new();
                while let Some((Scalar(k), Scalar(v))) = map.next_entry::<Scalar, Scalar>()? {
                    upsert(&mut members, k, v);
                }
                Ok(Members(members))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Members, A::Error> {
                let mut members = Vec::new();
                while let Some(Scalar(v)) = seq.next_element::<Scalar>()? {
                    members.push((members.len().to_string(), v));
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_any(MembersVisitor)
    }
}

impl<'de> Deserialize<'de> for OptionEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = OptionEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an option label or a group of option labels")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<OptionEntry, E> {
                Ok(OptionEntry::Flat(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<OptionEntry, E> {
                Ok(OptionEntry::Flat(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<OptionEntry, E> {
                Ok(OptionEntry::Flat(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<OptionEntry, E> {
                Ok(OptionEntry::Flat(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<OptionEntry, E> {
                Ok(OptionEntry::Flat(if v { "1" } else { "" }.to_string()))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<OptionEntry, A::Error> {
                let Members(members) =
                    Members::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(OptionEntry::Group(members))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<OptionEntry, A::Error> {
                let Members(members) =
                    Members::deserialize(de::value::SeqAccessDeserializer::new(seq))?;
                Ok(OptionEntry::Group(members))
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = OptionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping or sequence of options")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OptionSet, A::Error> {
                let mut set = OptionSet::new();
                while let Some((Scalar(k), entry)) = map.next_entry::<Scalar, OptionEntry>()? {
                    set.insert(k, entry);
                }
                Ok(set)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<OptionSet, A::Error> {
                let mut set = OptionSet::new();
                while let Some(entry) = seq.next_element::<OptionEntry>()? {
                    set.insert(set.len().to_string(), entry);
                }
                Ok(set)
            }

            fn visit_unit<E: de::Error>(self) -> Result<OptionSet, E> {
                Ok(OptionSet::new())
            }
        }

        deserializer.deserialize_any(SetVisitor)
    }
}

struct MembersRef<'a>(&'a [(String, String)]);

impl Serialize for MembersRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for OptionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flat(label) => serializer.serialize_str(label),
            Self::Group(members) => MembersRef(members).serialize(serializer),
        }
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, entry) in &self.entries {
            map.serialize_entry(k, entry)?;
        }
        map.end()
    }
}
