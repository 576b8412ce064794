//! Spelling oracle adapters.

mod frequency_dictionary;

pub use frequency_dictionary::{DictionaryError, FrequencyDictionary};
