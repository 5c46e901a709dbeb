//! Field values and block rows supplied to the engine

use serde::Deserialize;
use std::collections::BTreeMap;

/// Tag name to value mapping with case-insensitive lookup.
///
/// A tag may be present with a `None` value (an unset field); it renders as an
/// empty string, never as a literal `null`. Inserting a tag that differs only
/// in case replaces the previous entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<String>>")]
pub struct FieldValues {
    entries: BTreeMap<String, FieldEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldEntry {
    tag: String,
    value: Option<String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag to a value, or to unset when `value` is `None`
    pub fn insert(&mut self, tag: impl Into<String>, value: Option<String>) {
        let tag = tag.into();
        self.entries
            .insert(tag.to_lowercase(), FieldEntry { tag, value });
    }

    /// Builder-style variant of [`FieldValues::insert`] for a present value
    pub fn with(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(tag, Some(value.into()));
        self
    }

    /// Value for `tag`; `None` when the tag is absent or unset
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.lookup(tag).flatten()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(&tag.to_lowercase())
    }

    /// Distinguishes an absent tag (`None`) from an unset one (`Some(None)`)
    pub(crate) fn lookup(&self, tag: &str) -> Option<Option<&str>> {
        self.entries
            .get(&tag.to_lowercase())
            .map(|entry| entry.value.as_deref())
    }

    /// Iterate `(tag, value)` pairs, ordered by lower-cased tag
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .values()
            .map(|entry| (entry.tag.as_str(), entry.value.as_deref()))
    }

    /// Insert `value` for `tag` unless the tag is already present
    pub fn insert_if_absent(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        let tag = tag.into();
        if !self.contains(&tag) {
            self.insert(tag, Some(value.into()));
        }
    }

    /// Clear the value of `tag` if present
    pub fn blank(&mut self, tag: &str) {
        if let Some(entry) = self.entries.get_mut(&tag.to_lowercase()) {
            entry.value = None;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True for unset values and values made only of whitespace
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl From<BTreeMap<String, Option<String>>> for FieldValues {
    fn from(map: BTreeMap<String, Option<String>>) -> Self {
        let mut values = FieldValues::new();
        for (tag, value) in map {
            values.insert(tag, value);
        }
        values
    }
}

impl<K, V> FromIterator<(K, V)> for FieldValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FieldValues::new();
        for (tag, value) in iter {
            values.insert(tag, Some(value.into()));
        }
        values
    }
}

/// Rows supplied for one named repeated block, in render order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub rows: Vec<FieldValues>,
}

impl Block {
    pub fn new(name: impl Into<String>, rows: Vec<FieldValues>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let values = FieldValues::new().with("Name", "Alice");
        assert_eq!(values.get("NAME"), Some("Alice"));
        assert_eq!(values.get("name"), Some("Alice"));
        assert!(values.contains("nAmE"));
    }

    #[test]
    fn test_unset_value_is_present_but_empty() {
        let mut values = FieldValues::new();
        values.insert("NOTE", None);
        assert!(values.contains("NOTE"));
        assert_eq!(values.get("NOTE"), None);
        assert_eq!(values.lookup("NOTE"), Some(None));
        assert_eq!(values.lookup("OTHER"), None);
    }

    #[test]
    fn test_insert_differing_case_replaces() {
        let values = FieldValues::new().with("name", "a").with("NAME", "b");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("name"), Some("b"));
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let values: FieldValues =
            serde_json::from_str(r#"{"NAME": "Alice", "NOTE": null}"#).unwrap();
        assert_eq!(values.get("name"), Some("Alice"));
        assert!(values.contains("note"));
        assert!(is_blank(values.get("note")));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("  \n\t")));
        assert!(!is_blank(Some(" x ")));
    }
}
