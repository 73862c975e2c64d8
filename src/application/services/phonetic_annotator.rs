use std::sync::Arc;

use crate::application::ports::PhonemeDictionary;
use crate::domain::{PhonemeMap, Pronunciations, Transcript};

/// Lower-cases a token and drops every non-alphanumeric character.
pub fn normalize_word(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

pub struct PhoneticAnnotator {
    dictionary: Arc<dyn PhonemeDictionary>,
}

impl PhoneticAnnotator {
    pub fn new(dictionary: Arc<dyn PhonemeDictionary>) -> Self {
        Self { dictionary }
    }

    /// Every distinct non-empty normalized token gets exactly one entry;
    /// unknown words map to [`Pronunciations::NotFound`].
    pub fn annotate(&self, transcript: &Transcript) -> PhonemeMap {
        let mut map = PhonemeMap::new();

        for token in transcript.tokens() {
            let word = normalize_word(token);
            if word.is_empty() || map.contains(&word) {
                continue;
            }
            let phones = self.dictionary.phones_for(&word);
            map.insert(word, Pronunciations::from_lookup(phones));
        }

        tracing::debug!(
            words = map.len(),
            not_found = map.not_found_count(),
            "Transcript annotated with phonemes"
        );

        map
    }
}
