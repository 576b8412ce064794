//! Whitespace normalisation.

use std::sync::OnceLock;

use regex::Regex;

use super::is_separator;

static WHITESPACE_RUN_RE: OnceLock<Regex> = OnceLock::new();
static NEWLINE_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn whitespace_run_regex() -> &'static Regex {
    WHITESPACE_RUN_RE.get_or_init(|| {
        Regex::new(r"[\s\x1c-\x1f]{2,}")
            .unwrap_or_else(|error| panic!("whitespace regex failed to compile: {error}"))
    })
}

fn newline_run_regex() -> &'static Regex {
    NEWLINE_RUN_RE.get_or_init(|| {
        Regex::new(r"\n{2,}")
            .unwrap_or_else(|error| panic!("newline regex failed to compile: {error}"))
    })
}

/// Trim `text` and collapse internal whitespace.
///
/// Runs of two or more whitespace characters become one space first; runs of
/// newlines are collapsed afterwards, so a newline survives only when it
/// stands alone between two non-space characters.
///
/// # Examples
/// ```
/// use tidytext::domain::text::clean;
///
/// assert_eq!(clean("  a   b\n\n\nc  "), "a b c");
/// assert_eq!(clean("a\nb"), "a\nb");
/// ```
#[must_use]
pub fn clean(text: &str) -> String {
    let collapsed = whitespace_run_regex().replace_all(text.trim_matches(is_separator), " ");
    newline_run_regex().replace_all(&collapsed, "\n").into_owned()
}
