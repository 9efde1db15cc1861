use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").unwrap_or_else(|_| unreachable!()));

/// Collapse the whitespace a rendered cell may carry around or inside a name.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// Raw extracted text for one entity, keyed by schema field name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord {
    fields: BTreeMap<String, String>,
}

impl EntityRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` into `field`, returning the text it replaced.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.to_string(), value.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Entity name to record. A name is inserted once; later sightings only
/// update fields on the existing record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap {
    entities: BTreeMap<String, EntityRecord>,
}

impl EntityMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `name`, creating an empty one on first sighting.
    /// The flag is `true` when the record was created by this call.
    pub fn get_or_create(&mut self, name: &str) -> (&mut EntityRecord, bool) {
        let mut created = false;
        let record = self
            .entities
            .entry(name.to_string())
            .or_insert_with(|| {
                created = true;
                EntityRecord::new()
            });
        (record, created)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.entities.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EntityRecord> {
        self.entities.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityRecord)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }
}
