//! Word-frequency dictionary with edit-distance corrections.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ports::SpellingOracle;
use crate::domain::text::is_separator;

const BUNDLED: &str = include_str!("../../../data/en_frequency.txt");
const ALPHABET: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];
/// Words this much longer than the longest entry are never corrected.
const LENGTH_SLACK: usize = 3;

/// Failures loading a word list.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The file could not be read.
    #[error("failed to read dictionary at {path}: {source}")]
    Read {
        /// Configured location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A line is neither `word` nor `word count`.
    #[error("malformed dictionary line {line}: {content:?}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// No words survived parsing.
    #[error("dictionary contains no words")]
    Empty,
}

/// Lower-case words with occurrence counts.
///
/// The text format is one `word count` pair per line. A bare word counts as
/// one occurrence; blank lines and `#` comments are skipped.
///
/// # Examples
/// ```
/// use tidytext::domain::ports::SpellingOracle;
/// use tidytext::outbound::spelling::FrequencyDictionary;
///
/// let dict = FrequencyDictionary::parse("hello 10\nhelp 5\n").unwrap();
/// assert!(dict.is_known("hello"));
/// assert_eq!(dict.best_correction("helo").as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyDictionary {
    counts: HashMap<String, u64>,
    longest: usize,
}

impl FrequencyDictionary {
    /// The English list compiled into the binary.
    ///
    /// # Errors
    /// Only if the bundled list is corrupt.
    pub fn bundled() -> Result<Self, DictionaryError> {
        Self::parse(BUNDLED)
    }

    /// Read and parse the list at `path`.
    ///
    /// # Errors
    /// [`DictionaryError::Read`] plus anything [`Self::parse`] rejects.
    pub fn from_path(path: &Path) -> Result<Self, DictionaryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse the `word count` text format.
    ///
    /// # Errors
    /// [`DictionaryError::Malformed`] or [`DictionaryError::Empty`].
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let mut counts = HashMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_matches(is_separator);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split(is_separator).filter(|field| !field.is_empty());
            let (Some(word), count, None) = (fields.next(), fields.next(), fields.next()) else {
                return Err(DictionaryError::Malformed {
                    line: index + 1,
                    content: raw.to_owned(),
                });
            };
            let count = match count {
                Some(value) => value.parse::<u64>().map_err(|_| DictionaryError::Malformed {
                    line: index + 1,
                    content: raw.to_owned(),
                })?,
                None => 1,
            };
            *counts.entry(word.to_lowercase()).or_insert(0) += count;
        }
        Self::from_counts(counts)
    }

    /// Dictionary over pre-lowered words.
    ///
    /// # Errors
    /// [`DictionaryError::Empty`] for an empty map.
    pub fn from_counts(counts: HashMap<String, u64>) -> Result<Self, DictionaryError> {
        if counts.is_empty() {
            return Err(DictionaryError::Empty);
        }
        let longest = counts.keys().map(|w| w.chars().count()).max().unwrap_or(0);
        Ok(Self { counts, longest })
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false for a constructed dictionary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn frequency(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    fn worth_checking(&self, word: &str) -> bool {
        word.chars().any(char::is_alphabetic)
            && word.parse::<f64>().is_err()
            && word.chars().count() <= self.longest + LENGTH_SLACK
    }

    /// Most frequent known word among `candidates`; ties go to the
    /// alphabetically first.
    fn most_frequent<'a>(&self, candidates: impl IntoIterator<Item = &'a String>) -> Option<String> {
        candidates
            .into_iter()
            .filter_map(|word| self.frequency(word).map(|count| (count, word)))
            .max_by(|(ca, wa), (cb, wb)| ca.cmp(cb).then_with(|| wb.cmp(wa)))
            .map(|(_, word)| word.clone())
    }
}

impl SpellingOracle for FrequencyDictionary {
    fn is_known(&self, word: &str) -> bool {
        self.counts.contains_key(&word.to_lowercase())
    }

    fn best_correction(&self, word: &str) -> Option<String> {
        let lower = word.to_lowercase();
        if self.counts.contains_key(&lower) {
            return Some(lower);
        }
        if !self.worth_checking(&lower) {
            return None;
        }

        let first = edits1(&lower);
        if let Some(best) = self.most_frequent(&first) {
            return Some(best);
        }

        let second: HashSet<String> = first
            .iter()
            .flat_map(|edit| edits1(edit))
            .filter(|candidate| self.counts.contains_key(candidate))
            .collect();
        self.most_frequent(&second)
    }
}

fn splice(prefix: &[char], middle: &[char], suffix: &[char]) -> String {
    prefix.iter().chain(middle).chain(suffix).collect()
}

/// Every string one delete, transpose, replace or insert away from `word`.
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = HashSet::with_capacity(n * 54 + 26);

    for i in 0..n {
        out.insert(splice(&chars[..i], &[], &chars[i + 1..]));
    }
    for i in 0..n.saturating_sub(1) {
        out.insert(splice(&chars[..i], &[chars[i + 1], chars[i]], &chars[i + 2..]));
    }
    for i in 0..n {
        for c in ALPHABET {
            out.insert(splice(&chars[..i], &[*c], &chars[i + 1..]));
        }
    }
    for i in 0..=n {
        for c in ALPHABET {
            out.insert(splice(&chars[..i], &[*c], &chars[i..]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Write;

    #[fixture]
    fn small() -> FrequencyDictionary {
        FrequencyDictionary::parse(
            "# comment\n\nhello 100\nhelp 50\nhell 50\nworld 80\nword 90\nthe 1000\nspelling 10\n",
        )
        .expect("valid dictionary")
    }

    #[rstest]
    #[case("helo", Some("hello"))]
    #[case("wrld", Some("world"))]
    #[case("teh", Some("the"))]
    #[case("speling", Some("spelling"))]
    #[case("Hello", Some("hello"))]
    #[case("hello,", Some("hello"))]
    #[case("wrdl", Some("word"))]
    #[case("zzzzzzz", None)]
    #[case("12", None)]
    #[case("3.14", None)]
    #[case("!!", None)]
    fn corrections(small: FrequencyDictionary, #[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(small.best_correction(input).as_deref(), expected);
    }

    #[rstest]
    fn equal_frequencies_break_ties_alphabetically(small: FrequencyDictionary) {
        // "helk" is one edit from both "hell" and "help", each counted 50.
        assert_eq!(small.best_correction("helk").as_deref(), Some("hell"));
    }

    #[rstest]
    fn lookups_ignore_case(small: FrequencyDictionary) {
        assert!(small.is_known("WORLD"));
        assert!(!small.is_known("planet"));
    }

    #[rstest]
    fn edits1_covers_all_operation_kinds() {
        let edits = edits1("ab");
        for expected in ["a", "b", "ba", "xb", "ax", "xab", "axb", "abx"] {
            assert!(edits.contains(expected), "missing {expected}");
        }
    }

    #[rstest]
    #[case("word notanumber\n")]
    #[case("too many fields 1\n")]
    fn malformed_lines_are_rejected(#[case] text: &str) {
        assert!(matches!(
            FrequencyDictionary::parse(text),
            Err(DictionaryError::Malformed { line: 1, .. })
        ));
    }

    #[rstest]
    fn separator_controls_split_fields() {
        let dictionary = FrequencyDictionary::parse("hello\u{1f}7\n").expect("dictionary");
        assert!(dictionary.is_known("hello"));
    }

    #[rstest]
    fn empty_dictionary_is_rejected() {
        assert!(matches!(
            FrequencyDictionary::parse("# nothing\n"),
            Err(DictionaryError::Empty)
        ));
    }

    #[rstest]
    fn bundled_list_loads() {
        let dict = FrequencyDictionary::bundled().expect("bundled list parses");
        assert!(dict.len() > 500);
        assert!(dict.is_known("the"));
        assert_eq!(dict.best_correction("wrold").as_deref(), Some("world"));
    }

    #[rstest]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "custom 3").expect("write");
        let dict = FrequencyDictionary::from_path(file.path()).expect("load");
        assert!(dict.is_known("custom"));
    }

    #[rstest]
    fn missing_file_reports_path() {
        let err = FrequencyDictionary::from_path(Path::new("/nonexistent/words.txt"))
            .expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/words.txt"));
    }
}
