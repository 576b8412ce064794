//! Text transformation engine.
//!
//! Pure functions over `&str`. Nothing here performs I/O; the spell corrector
//! consults an injected [`SpellingOracle`].

mod case;
mod clean;
mod slug;
mod spell;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SpellingOracle;

pub use case::{
    camel_from_words, snake_from_words, title_from_words, to_camel, to_snake, to_title, tokenize,
};
pub use clean::clean;
pub use slug::slug;
pub use spell::correct;

/// Unicode whitespace plus the ASCII information separators `\x1c`..=`\x1f`.
/// Regex patterns in this module spell the same set as `[\s\x1c-\x1f]`.
pub(crate) fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

/// The transformation applied to a piece of text.
///
/// Recorded verbatim in history entries as the lower-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Trim and collapse whitespace.
    Clean,
    /// URL slug.
    Slug,
    /// camelCase.
    Camel,
    /// snake_case.
    Snake,
    /// Title Case.
    Title,
    /// Dictionary spelling correction.
    Spell,
}

impl TransformKind {
    /// Every kind, in routing order.
    pub const ALL: [TransformKind; 6] = [
        Self::Clean,
        Self::Slug,
        Self::Camel,
        Self::Snake,
        Self::Title,
        Self::Spell,
    ];

    /// Lower-case name used in routes and history records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Slug => "slug",
            Self::Camel => "camel",
            Self::Snake => "snake",
            Self::Title => "title",
            Self::Spell => "spell",
        }
    }

    /// Run this transformation over `text`.
    #[must_use]
    pub fn apply(self, text: &str, oracle: &dyn SpellingOracle) -> String {
        match self {
            Self::Clean => clean(text),
            Self::Slug => slug(text),
            Self::Camel => to_camel(text),
            Self::Snake => to_snake(text),
            Self::Title => to_title(text),
            Self::Spell => correct(text, oracle),
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name matches no [`TransformKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transform kind: {0}")]
pub struct UnknownTransformKind(pub String);

impl FromStr for TransformKind {
    type Err = UnknownTransformKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTransformKind(s.to_owned()))
    }
}

/// Input accepted by every transform: at least one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformText(String);

/// Rejection for zero-length input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("text must not be empty")]
pub struct EmptyTransformText;

impl TransformText {
    /// Wrap `text`, rejecting the empty string.
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyTransformText> {
        let text = text.into();
        if text.is_empty() {
            return Err(EmptyTransformText);
        }
        Ok(Self(text))
    }

    /// Borrow the wrapped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TransformText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests;
