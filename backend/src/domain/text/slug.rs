//! URL slug generation.

use std::sync::OnceLock;

use regex::Regex;

static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
static HYPHEN_RUN_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("slug regex {pattern} failed to compile: {error}"))
    })
}

/// Lower-case, hyphen-separated form of `text`.
///
/// The output is either empty or matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
/// Non-ASCII letters are dropped rather than transliterated.
///
/// # Examples
/// ```
/// use tidytext::domain::text::slug;
///
/// assert_eq!(slug("  Hello, World! "), "hello-world");
/// assert_eq!(slug("--"), "");
/// ```
#[must_use]
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = compiled(&WHITESPACE_RE, r"[\s\x1c-\x1f]+").replace_all(&lowered, "-");
    let filtered = compiled(&DISALLOWED_RE, r"[^a-z0-9-]").replace_all(&hyphenated, "");
    let collapsed = compiled(&HYPHEN_RUN_RE, r"-+").replace_all(&filtered, "-");
    collapsed.trim_matches('-').to_owned()
}
