use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Rendered in place of a transcription list when the dictionary has no entry.
pub const PHONEME_NOT_FOUND: &str = "No phoneme found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pronunciations {
    Found(Vec<String>),
    NotFound,
}

impl Pronunciations {
    pub fn from_lookup(phones: Vec<String>) -> Self {
        if phones.is_empty() {
            Self::NotFound
        } else {
            Self::Found(phones)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn phones(&self) -> &[String] {
        match self {
            Self::Found(phones) => phones,
            Self::NotFound => &[],
        }
    }
}

impl Serialize for Pronunciations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(phones) => phones.serialize(serializer),
            Self::NotFound => serializer.serialize_str(PHONEME_NOT_FOUND),
        }
    }
}

/// Normalized word → pronunciations. Keys are unique and kept sorted so the
/// rendered form is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhonemeMap(BTreeMap<String, Pronunciations>);

impl PhonemeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: String, pronunciations: Pronunciations) {
        self.0.insert(word, pronunciations);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&Pronunciations> {
        self.0.get(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pronunciations)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn not_found_count(&self) -> usize {
        self.0.values().filter(|p| !p.is_found()).count()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
