//! Word tokenizer and the case converters built on it.
//!
//! `fooBar`, `foo_bar`, `foo-bar` and `foo bar` all tokenize to
//! `["foo", "bar"]`, so converting between styles is a matter of joining the
//! same words differently.

use std::sync::OnceLock;

use regex::Regex;

use super::is_separator;

static DELIMITER_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn delimiter_run_regex() -> &'static Regex {
    DELIMITER_RUN_RE.get_or_init(|| {
        Regex::new(r"[_\-]+")
            .unwrap_or_else(|error| panic!("delimiter regex failed to compile: {error}"))
    })
}

/// Split `text` into words.
///
/// Underscore and hyphen runs become spaces, every ASCII uppercase letter
/// after the first character starts a new word, and the result is split on
/// whitespace with empty tokens dropped.
///
/// # Examples
/// ```
/// use tidytext::domain::text::tokenize;
///
/// assert_eq!(tokenize("fooBar"), vec!["foo", "Bar"]);
/// assert_eq!(tokenize("foo__bar-baz"), vec!["foo", "bar", "baz"]);
/// assert!(tokenize("").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let spaced = delimiter_run_regex().replace_all(text, " ");
    mark_case_boundaries(&spaced)
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

fn mark_case_boundaries(text: &str) -> String {
    let mut marked = String::with_capacity(text.len() + text.len() / 4);
    for (index, ch) in text.char_indices() {
        if index > 0 && ch.is_ascii_uppercase() {
            marked.push(' ');
        }
        marked.push(ch);
    }
    marked
}

/// Upper-case every cased letter that follows an uncased character and
/// lower-case the rest, so `o'brien` becomes `O'Brien` and `2beta` becomes
/// `2Beta`.
fn capitalise(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut previous_cased = false;
    for ch in word.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_cased = ch.is_lowercase() || ch.is_uppercase();
    }
    out
}

/// `["foo", "bar"]` → `"fooBar"`.
#[must_use]
pub fn camel_from_words<S: AsRef<str>>(words: &[S]) -> String {
    let mut iter = words.iter().map(AsRef::as_ref);
    let Some(head) = iter.next() else {
        return String::new();
    };
    let mut out = head.to_lowercase();
    for word in iter {
        out.push_str(&capitalise(word));
    }
    out
}

/// `["Foo", "Bar"]` → `"foo_bar"`.
#[must_use]
pub fn snake_from_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// `["foo", "bar"]` → `"Foo Bar"`.
#[must_use]
pub fn title_from_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| capitalise(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenize `text` and join the words in camelCase.
///
/// # Examples
/// ```
/// use tidytext::domain::text::to_camel;
///
/// assert_eq!(to_camel("some_variable_name"), "someVariableName");
/// assert_eq!(to_camel("foo bar2baz"), "fooBar2Baz");
/// ```
#[must_use]
pub fn to_camel(text: &str) -> String {
    camel_from_words(&tokenize(text))
}

/// Tokenize `text` and join the lower-cased words with underscores.
#[must_use]
pub fn to_snake(text: &str) -> String {
    snake_from_words(&tokenize(text))
}

/// Tokenize `text` and join the capitalised words with spaces.
#[must_use]
pub fn to_title(text: &str) -> String {
    title_from_words(&tokenize(text))
}
