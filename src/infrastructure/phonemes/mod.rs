mod cmu_dictionary;

pub use cmu_dictionary::{CmuDictionary, CmuDictionaryError};
