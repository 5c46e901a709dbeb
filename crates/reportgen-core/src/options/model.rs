use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name → allowed values, persisted as one JSON object.
///
/// Entries that are not option objects are kept verbatim so a hand-edited
/// catalog survives a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsCatalog {
    fields: BTreeMap<String, CatalogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Field(FieldOptions),
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    #[serde(rename = "dependsOn", default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
    /// Unrecognized keys, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionEntry {
    Plain(String),
    Dependent {
        value: String,
        #[serde(default)]
        parents: Vec<String>,
    },
    Other(Value),
}

/// Result of inserting into the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Insertion {
    Inserted,
    Duplicate,
    Rejected(String),
}

impl OptionEntry {
    /// The option's value, or `None` for unrecognized entries
    pub fn value(&self) -> Option<&str> {
        match self {
            OptionEntry::Plain(value) => Some(value),
            OptionEntry::Dependent { value, .. } => Some(value),
            OptionEntry::Other(_) => None,
        }
    }

    /// Whether this entry is offered when the parent field holds `parent`
    fn allowed_under(&self, parent: Option<&str>) -> bool {
        match (self, parent) {
            (OptionEntry::Other(_), _) => false,
            (OptionEntry::Plain(_), _) | (_, None) => true,
            (OptionEntry::Dependent { parents, .. }, Some(parent)) => {
                parents.iter().any(|p| eq_fold(p, parent))
            }
        }
    }
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl FieldOptions {
    /// The declared parent field; an empty `dependsOn` counts as none
    pub fn dependency(&self) -> Option<&str> {
        self.depends_on.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Case-insensitive membership test
    pub fn contains_value(&self, value: &str) -> bool {
        self.options
            .iter()
            .filter_map(OptionEntry::value)
            .any(|existing| eq_fold(existing, value))
    }
}

impl OptionsCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document; the top level must be a JSON object
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Pretty-printed JSON, stable across runs
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn entry(&self, field: &str) -> Option<&CatalogEntry> {
        self.fields.get(field)
    }

    /// The options object for `field`, if it has one
    pub fn field(&self, field: &str) -> Option<&FieldOptions> {
        match self.fields.get(field)? {
            CatalogEntry::Field(options) => Some(options),
            CatalogEntry::Other(_) => None,
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Allowed values for `field`, sorted ascending by byte order
    ///
    /// Bare values are always included. Dependent values are filtered by
    /// `parent` (case-insensitive) unless `parent` is empty or absent.
    pub fn options(&self, field: &str, parent: Option<&str>) -> Vec<String> {
        let Some(field) = self.field(field) else {
            return Vec::new();
        };
        let parent = parent.filter(|p| !p.is_empty());

        let mut values: Vec<String> = field
            .options
            .iter()
            .filter(|entry| entry.allowed_under(parent))
            .filter_map(|entry| entry.value().map(str::to_string))
            .collect();
        values.sort();
        values
    }

    pub fn dependency(&self, field: &str) -> Option<&str> {
        self.field(field)?.dependency()
    }

    /// Insert `value` into `field`, creating the field when missing
    pub(crate) fn insert(&mut self, field: &str, value: &str, parent: Option<&str>) -> Insertion {
        if value.trim().is_empty() {
            return Insertion::Rejected("value is blank".to_string());
        }

        let entry = self
            .fields
            .entry(field.to_string())
            .or_insert_with(|| CatalogEntry::Field(FieldOptions::default()));
        let CatalogEntry::Field(options) = entry else {
            return Insertion::Rejected(format!("'{}' is not an options object", field));
        };

        if options.contains_value(value) {
            return Insertion::Duplicate;
        }

        let new_entry = match options.dependency() {
            None => OptionEntry::Plain(value.to_string()),
            Some(_) => OptionEntry::Dependent {
                value: value.to_string(),
                parents: parent
                    .filter(|p| !p.is_empty())
                    .map(|p| vec![p.to_string()])
                    .unwrap_or_default(),
            },
        };
        options.options.push(new_entry);
        Insertion::Inserted
    }
}
