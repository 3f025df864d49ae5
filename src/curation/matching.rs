//! Free-text answer interpretation.
//!
//! Every rule that turns a free-text interview answer into a decision lives
//! here so the matching order can be tested and swapped in one place.
//!
//! Grade matching is a substring cascade in fixed priority order. It is
//! knowingly loose: "12th grade" and "grade 10" both contain "1" and land in
//! the 1st-grade bucket before any later rule is tried, and any answer with a
//! "k" in it ("kids", "week") lands in kindergarten.

use crate::constants::{curation, vocabulary};
use crate::types::GradeBucket;

/// Substring rules checked in order; the first rule with a hit wins.
const GRADE_RULES: [(GradeBucket, &[&str]); 7] = [
    (GradeBucket::Kindergarten, &["k", "kind"]),
    (GradeBucket::First, &["1", "first"]),
    (GradeBucket::Second, &["2", "second"]),
    (GradeBucket::Third, &["3", "third"]),
    (GradeBucket::Fourth, &["4", "fourth"]),
    (GradeBucket::Fifth, &["5", "fifth"]),
    (GradeBucket::Middle, &["middle", "6", "7", "8"]),
];

/// Map a grade/age description to exactly one bucket. Unmatched input is `Middle`.
pub fn normalize_grade(grade_level: &str) -> GradeBucket {
    let grade = grade_level.to_lowercase();
    GRADE_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| grade.contains(n)))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(GradeBucket::Middle)
}

/// Leading integer of the time answer, in minutes.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. No digits, or a value of zero, yields the 30 minute default.
pub fn available_minutes(time: &str) -> i64 {
    leading_integer(time)
        .filter(|minutes| *minutes != 0)
        .unwrap_or(curation::DEFAULT_MINUTES)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let digits: &str = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

pub fn is_low_confidence(confidence: &str) -> bool {
    contains_any(confidence, &vocabulary::LOW_CONFIDENCE)
}

pub fn is_informal_setting(environment: &str) -> bool {
    contains_any(environment, &vocabulary::INFORMAL_SETTINGS)
}

fn contains_any(answer: &str, vocabulary: &[&str]) -> bool {
    let lower = answer.to_lowercase();
    vocabulary.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grade_buckets() {
        assert_eq!(normalize_grade("Kindergarten"), GradeBucket::Kindergarten);
        assert_eq!(normalize_grade("1st grade"), GradeBucket::First);
        assert_eq!(normalize_grade("Second graders"), GradeBucket::Second);
        assert_eq!(normalize_grade("3rd"), GradeBucket::Third);
        assert_eq!(normalize_grade("fourth grade"), GradeBucket::Fourth);
        assert_eq!(normalize_grade("5TH GRADE"), GradeBucket::Fifth);
        assert_eq!(normalize_grade("middle school"), GradeBucket::Middle);
        assert_eq!(normalize_grade("grade 7"), GradeBucket::Middle);
        assert_eq!(normalize_grade(""), GradeBucket::Middle);
        assert_eq!(normalize_grade("high school"), GradeBucket::Middle);
    }

    // Loose matching kept on purpose: these land in surprising buckets.
    #[test]
    fn test_grade_priority_quirks() {
        assert_eq!(normalize_grade("12th grade"), GradeBucket::First);
        assert_eq!(normalize_grade("grade 1"), GradeBucket::First);
        assert_eq!(normalize_grade("10-12 years old"), GradeBucket::First);
        assert_eq!(normalize_grade("kids aged 9"), GradeBucket::Kindergarten);
        assert_eq!(normalize_grade("third and fifth"), GradeBucket::Third);
    }

    #[test]
    fn test_available_minutes() {
        assert_eq!(available_minutes("45 minutes"), 45);
        assert_eq!(available_minutes("  20min"), 20);
        assert_eq!(available_minutes("1 hour"), 1);
        assert_eq!(available_minutes("an hour"), 30);
        assert_eq!(available_minutes(""), 30);
        assert_eq!(available_minutes("0 minutes"), 30);
        assert_eq!(available_minutes("+50"), 50);
        assert_eq!(available_minutes("-5 minutes"), -5);
    }

    #[test]
    fn test_vocabularies() {
        assert!(is_low_confidence("Not very confident"));
        assert!(is_low_confidence("Need support"));
        assert!(!is_low_confidence("Somewhat confident"));
        assert!(!is_low_confidence("Very confident"));

        assert!(is_informal_setting("After-school club"));
        assert!(is_informal_setting("public LIBRARY"));
        assert!(is_informal_setting("summer camp"));
        assert!(!is_informal_setting("classroom"));
    }

    proptest! {
        #[test]
        fn prop_kind_is_kindergarten(prefix in ".*", suffix in ".*") {
            let input = format!("{prefix}KiNd{suffix}");
            prop_assert_eq!(normalize_grade(&input), GradeBucket::Kindergarten);
        }

        #[test]
        fn prop_unrecognized_is_middle(input in "[abdeghijlmnopqrsuvwxyz ,.!-]*") {
            // no k, no digits, and without c/f/t none of the ordinal words can appear
            prop_assert_eq!(normalize_grade(&input), GradeBucket::Middle);
        }

        #[test]
        fn prop_leading_digits_parse(n in 1i64..100_000, unit in "[ a-z]*") {
            let input = format!("{n}{unit}");
            prop_assert_eq!(available_minutes(&input), n);
        }
    }
}
