//! Lexical relevance scoring.
//!
//! The score is a weighted term-overlap fraction: the share of query terms
//! found in the title carries three times the weight of the share found in
//! the body, and the weighted sum is normalized back into [0.0, 1.0]. Every
//! kind scores through this one function, which is what makes cross-kind
//! ordering meaningful.

/// Split a query into lowercase whitespace-delimited terms.
pub fn split_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Fraction of terms contained in the field, case-insensitively.
fn field_fraction(field: &str, terms: &[String]) -> f32 {
    if terms.is_empty() {
        return 0.0;
    }
    let field = field.to_lowercase();
    let hits = terms.iter().filter(|t| field.contains(t.as_str())).count();
    hits as f32 / terms.len() as f32
}

/// Score pre-split terms against a title and body.
///
/// Zero terms score 0.0. A full title match with no body match scores
/// 0.75; a full body match with no title match scores 0.25; matching both
/// scores 1.0.
pub fn score_terms(title: &str, body: &str, terms: &[String]) -> f32 {
    if terms.is_empty() {
        return 0.0;
    }
    let title_frac = field_fraction(title, terms);
    let body_frac = field_fraction(body, terms);
    (title_frac * 3.0 + body_frac) / 4.0
}

/// Score a raw query against a title and body. Returns a value in [0.0, 1.0].
pub fn score(title: &str, body: &str, query: &str) -> f32 {
    score_terms(title, body, &split_terms(query))
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// For any inputs, the score stays within [0.0, 1.0].
        #[test]
        fn prop_score_is_bounded(
            title in ".{0,60}",
            body in ".{0,200}",
            query in ".{0,40}",
        ) {
            let s = score(&title, &body, &query);
            prop_assert!((0.0..=1.0).contains(&s), "score {} out of bounds", s);
        }

        /// Whitespace-only queries always score zero.
        #[test]
        fn prop_blank_query_scores_zero(
            title in ".{0,60}",
            body in ".{0,200}",
            query in "[ \t\r\n]{0,20}",
        ) {
            prop_assert_eq!(score(&title, &body, &query), 0.0);
        }

        /// A query whose every term sits in the title never scores below 0.75.
        #[test]
        fn prop_full_title_match_scores_at_least_three_quarters(
            terms in prop::collection::vec("[a-z]{2,8}", 1..5),
            body in "[a-z ]{0,40}",
        ) {
            let title = terms.join(" ");
            let query = terms.join(" ");
            let s = score(&title, &body, &query);
            prop_assert!(s >= 0.75 - f32::EPSILON, "score {} below title weight", s);
        }

        /// Scoring is deterministic.
        #[test]
        fn prop_score_is_deterministic(
            title in ".{0,60}",
            body in ".{0,200}",
            query in ".{0,40}",
        ) {
            prop_assert_eq!(score(&title, &body, &query), score(&title, &body, &query));
        }
    }
}
