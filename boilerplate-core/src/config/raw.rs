use std::collections::BTreeMap;

/// Normalized dotted key to raw string value, as read from the environment.
///
/// Built by the scanner and consumed by the decoder within a single load;
/// nothing holds on to it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    entries: BTreeMap<String, String>,
}

impl RawSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing (and returning) any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for RawSettings {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
