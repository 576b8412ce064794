//! Driven port answering dictionary questions for the spell corrector.

/// Word lookups backing spelling correction.
#[cfg_attr(test, mockall::automock)]
pub trait SpellingOracle: Send + Sync {
    /// Whether the lower-cased `word` is in the dictionary.
    fn is_known(&self, word: &str) -> bool;

    /// Most likely intended word for `word`, if any candidate exists.
    fn best_correction(&self, word: &str) -> Option<String>;
}
