//! Dictionary-backed spelling correction.

use super::is_separator;
use crate::domain::ports::SpellingOracle;

/// Correct each whitespace-separated token of `text` against `oracle`.
///
/// Alphabetic tokens the oracle already knows keep their original casing.
/// Every other token is swapped for the oracle's best correction, or kept as
/// is when there is none. Tokens are re-joined with single spaces, so
/// newlines and repeated spaces in the input are not preserved.
#[must_use]
pub fn correct(text: &str, oracle: &dyn SpellingOracle) -> String {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .map(|token| correct_token(token, oracle))
        .collect::<Vec<_>>()
        .join(" ")
}

fn correct_token(token: &str, oracle: &dyn SpellingOracle) -> String {
    let alphabetic = token.chars().all(char::is_alphabetic);
    if alphabetic && oracle.is_known(&token.to_lowercase()) {
        return token.to_owned();
    }
    oracle
        .best_correction(token)
        .unwrap_or_else(|| token.to_owned())
}
