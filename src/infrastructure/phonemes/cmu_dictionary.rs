use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::ports::PhonemeDictionary;

/// In-memory CMU Pronouncing Dictionary.
///
/// Accepts both the classic `HELLO  HH AH0 L OW1` layout and the
/// `cmudict.dict` layout (lower-case headwords, `hello(2)` alternates,
/// trailing `# comment`). Alternates keep their file order.
#[derive(Debug, Default)]
pub struct CmuDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl CmuDictionary {
    pub fn from_path(path: &Path) -> Result<Self, CmuDictionaryError> {
        let bytes = std::fs::read(path).map_err(|source| CmuDictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // Older releases ship as Latin-1; lossy decoding keeps every ASCII entry.
        let dictionary = Self::parse(&String::from_utf8_lossy(&bytes));

        if dictionary.is_empty() {
            return Err(CmuDictionaryError::Empty(path.to_path_buf()));
        }

        tracing::info!(
            path = %path.display(),
            words = dictionary.len(),
            "Phoneme dictionary loaded"
        );

        Ok(dictionary)
    }

    pub fn parse(source: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();

        for line in source.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let Some((headword, phones)) = line.split_once(char::is_whitespace) else {
                continue;
            };
            let phones = phones.split_whitespace().collect::<Vec<_>>().join(" ");
            if phones.is_empty() {
                continue;
            }

            let word = strip_variant(headword).to_lowercase();
            entries.entry(word).or_default().push(phones);
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PhonemeDictionary for CmuDictionary {
    fn phones_for(&self, word: &str) -> Vec<String> {
        self.entries.get(word).cloned().unwrap_or_default()
    }
}

/// `read(2)` → `read`
fn strip_variant(headword: &str) -> &str {
    match headword.find('(') {
        Some(idx) if idx > 0 && headword.ends_with(')') => &headword[..idx],
        _ => headword,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CmuDictionaryError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no pronunciation entries in {}", .0.display())]
    Empty(PathBuf),
}
