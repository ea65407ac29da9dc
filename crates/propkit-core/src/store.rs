use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::{ParseSummary, PropertySink, parse_lines, parse_str};

/// String-to-string property set.
///
/// The backing map stays private; only the narrow get/set surface is exposed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyStore {
    entries: BTreeMap<String, String>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a new store with a copy of every entry in `defaults`.
    pub fn with_defaults(defaults: &PropertyStore) -> Self {
        Self {
            entries: defaults.entries.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn load_lines<'a, I>(&mut self, lines: I) -> ParseSummary
    where
        I: IntoIterator<Item = &'a str>,
    {
        parse_lines(lines, self)
    }

    pub fn load_str(&mut self, input: &str) -> ParseSummary {
        parse_str(input, self)
    }
}

impl PropertySink for PropertyStore {
    fn insert_property(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }
}
