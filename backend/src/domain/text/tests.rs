//! Property and integration coverage for the transformation engine.

use super::*;
use crate::domain::ports::MockSpellingOracle;
use proptest::prelude::*;
use regex::Regex;
use rstest::rstest;

#[rstest]
fn kind_names_round_trip() {
    for kind in TransformKind::ALL {
        assert_eq!(kind.as_str().parse::<TransformKind>(), Ok(kind));
    }
    assert!("upper".parse::<TransformKind>().is_err());
}

#[rstest]
fn kind_serialises_lowercase() {
    let value = serde_json::to_value(TransformKind::Camel).expect("serialise");
    assert_eq!(value, serde_json::json!("camel"));
}

#[rstest]
#[case("", false)]
#[case(" ", true)]
#[case("x", true)]
fn transform_text_requires_one_character(#[case] raw: &str, #[case] accepted: bool) {
    assert_eq!(TransformText::new(raw).is_ok(), accepted);
}

#[rstest]
#[case(TransformKind::Clean, "  a   b  ", "a b")]
#[case(TransformKind::Slug, "Hello World", "hello-world")]
#[case(TransformKind::Camel, "hello_world", "helloWorld")]
#[case(TransformKind::Snake, "helloWorld", "hello_world")]
#[case(TransformKind::Title, "hello-world", "Hello World")]
fn apply_dispatches_without_touching_the_oracle(
    #[case] kind: TransformKind,
    #[case] input: &str,
    #[case] expected: &str,
) {
    let oracle = MockSpellingOracle::new();
    assert_eq!(kind.apply(input, &oracle), expected);
}

#[rstest]
fn spell_dispatch_consults_the_oracle() {
    let mut oracle = MockSpellingOracle::new();
    oracle.expect_is_known().return_const(true);
    assert_eq!(TransformKind::Spell.apply("fine words", &oracle), "fine words");
}

fn slug_shape() -> Regex {
    Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid pattern")
}

proptest! {
    #[test]
    fn slug_output_is_empty_or_well_formed(s in any::<String>()) {
        let out = slug(&s);
        prop_assert!(out.is_empty() || slug_shape().is_match(&out), "bad slug {:?}", out);
    }

    #[test]
    fn slug_is_idempotent(s in any::<String>()) {
        let once = slug(&s);
        prop_assert_eq!(slug(&once), once);
    }

    #[test]
    fn clean_is_idempotent(s in any::<String>()) {
        let once = clean(&s);
        prop_assert_eq!(clean(&once), once);
    }

    #[test]
    fn clean_output_has_no_whitespace_runs(s in "[a-z \\t\\n]{0,64}") {
        let out = clean(&s);
        prop_assert_eq!(out.trim(), out.as_str());
        let ws_pair = out
            .chars()
            .zip(out.chars().skip(1))
            .any(|(a, b)| a.is_whitespace() && b.is_whitespace());
        prop_assert!(!ws_pair);
    }

    #[test]
    fn delimiter_styles_share_words(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let snake = words.join("_");
        let kebab = words.join("-");
        let camel = camel_from_words(&words);
        prop_assert_eq!(&tokenize(&snake), &words);
        prop_assert_eq!(&tokenize(&kebab), &words);
        let lowered: Vec<String> = tokenize(&camel).iter().map(|w| w.to_lowercase()).collect();
        prop_assert_eq!(&lowered, &words);
        prop_assert_eq!(to_snake(&camel), snake);
    }
}
