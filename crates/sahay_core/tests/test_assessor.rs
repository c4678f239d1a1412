//! Assessor behavior: purity, normalization tolerance, per-category
//! dedup, additive scoring, and deterministic indicator ordering.

mod common;

use common::{TIE_TABLE, assess};
use sahay_core::risk::{
    IndicatorCategory, RiskAssessor, RiskAssessorMetrics, RiskLevel,
};

#[test]
fn test_empty_input_yields_none() {
    for message in ["", "   ", "\t\n", "?!."] {
        let assessment = assess(message);
        assert_eq!(assessment.level, RiskLevel::None, "input {message:?}");
        assert_eq!(assessment.score, 0);
        assert!(assessment.triggered.is_empty());
    }
}

#[test]
fn test_benign_message_yields_none() {
    let assessment = assess("just a normal day at work");
    assert_eq!(assessment.level, RiskLevel::None);
    assert_eq!(assessment.score, 0);
    assert!(assessment.triggered.is_empty());
}

#[test]
fn test_assess_is_deterministic() {
    let message = "I feel hopeless and want to give up";
    let first = assess(message);
    for _ in 0..5 {
        assert_eq!(assess(message), first);
    }
}

#[test]
fn test_matching_is_case_insensitive() {
    let upper = assess("I WANT TO KILL MYSELF");
    let lower = assess("i want to kill myself");
    assert_eq!(upper.score, lower.score);
    assert_eq!(upper.level, RiskLevel::High);
}

#[test]
fn test_hinglish_phrases_match_with_suffix_variants() {
    // Stem prefixes tolerate hoon/hu transliteration variants.
    for message in ["marna chahta hoon", "marna chahta hu", "Jeena nahi chahti"] {
        let assessment = assess(message);
        assert_eq!(assessment.level, RiskLevel::High, "input {message:?}");
        assert_eq!(
            assessment.triggered[0].category,
            IndicatorCategory::SelfHarm
        );
    }
}

#[test]
fn test_category_counted_once_despite_multiple_phrases() {
    // Three hopelessness phrases, one category, one weight contribution.
    let assessment = assess("hopeless, no way out, might as well give up");
    assert_eq!(assessment.score, 4);
    assert_eq!(assessment.triggered.len(), 1);
    assert_eq!(
        assessment.triggered[0].category,
        IndicatorCategory::Hopelessness
    );
    // Earliest phrase occurrence wins.
    assert_eq!(assessment.triggered[0].matched_text, "hopeless");
    assert_eq!(assessment.triggered[0].match_pos, 0);
}

#[test]
fn test_categories_sum_across_rules() {
    // worthlessness (3) + isolation (2) = 5.
    let assessment = assess("i feel worthless and all alone");
    assert_eq!(assessment.score, 5);
    assert_eq!(assessment.level, RiskLevel::Moderate);
    let categories: Vec<_> = assessment.triggered.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            IndicatorCategory::Worthlessness,
            IndicatorCategory::Isolation
        ]
    );
}

#[test]
fn test_monotonic_under_phrase_superset() {
    let smaller = assess("i feel worthless");
    let larger = assess("i feel worthless and all alone");
    assert!(larger.score >= smaller.score);
}

#[test]
fn test_indicators_ordered_by_match_position() {
    // isolation appears before worthlessness in the text, so it leads
    // despite its lower weight and later table position.
    let assessment = assess("all alone and worthless");
    let categories: Vec<_> = assessment.triggered.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            IndicatorCategory::Isolation,
            IndicatorCategory::Worthlessness
        ]
    );
    assert!(assessment.triggered[0].match_pos < assessment.triggered[1].match_pos);
}

#[test]
fn test_position_ties_break_on_category_token() {
    let assessor = RiskAssessor::with_table(TIE_TABLE);
    let mut metrics = RiskAssessorMetrics::new();
    let assessment = assessor.assess("lost cause", 0, &mut metrics);

    assert_eq!(assessment.triggered.len(), 2);
    assert_eq!(assessment.triggered[0].match_pos, 0);
    assert_eq!(assessment.triggered[1].match_pos, 0);
    // "hopelessness" < "isolation" lexically.
    assert_eq!(
        assessment.triggered[0].category,
        IndicatorCategory::Hopelessness
    );
    assert_eq!(
        assessment.triggered[1].category,
        IndicatorCategory::Isolation
    );
}

#[test]
fn test_punctuation_and_accents_do_not_block_matches() {
    let assessment = assess("I can't cope... everything is hopeless!");
    let categories: Vec<_> = assessment.triggered.iter().map(|i| i.category).collect();
    assert!(categories.contains(&IndicatorCategory::AcuteDistress));
    assert!(categories.contains(&IndicatorCategory::Hopelessness));
    assert_eq!(assessment.score, 5);
}

#[test]
fn test_metrics_count_assessed_and_flagged() {
    let assessor = RiskAssessor::new();
    let mut metrics = RiskAssessorMetrics::new();

    assessor.assess("a normal message", 0, &mut metrics);
    assessor.assess("i feel hopeless and want to give up", 0, &mut metrics);

    assert_eq!(metrics.assessed_total(), 2);
    assert_eq!(metrics.flagged_total(), 1);
    assert_eq!(metrics.severe_total(), 1);
}

#[test]
fn test_timestamp_is_carried_through() {
    let assessor = RiskAssessor::new();
    let mut metrics = RiskAssessorMetrics::new();
    let assessment = assessor.assess("hello", 42_000, &mut metrics);
    assert_eq!(assessment.assessed_at_ms, 42_000);
}
