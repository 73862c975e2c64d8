/// Pronunciation lookup for a single normalized word.
///
/// Returns every known transcription in dictionary order; an empty vector
/// means the word is unknown.
pub trait PhonemeDictionary: Send + Sync {
    fn phones_for(&self, word: &str) -> Vec<String>;
}
