//! Token-set fuzzy similarity.
//!
//! Scores two normalized strings on a 0-100 scale using a token-set metric:
//! the word sets of both sides are split into their intersection and
//! per-side remainders, and the result is the best character-level ratio
//! among (intersection vs intersection+rest) pairings. Shared tokens
//! dominate the score, so reordered words or one-sided extra tokens still
//! score near 100, while plain edit distance covers the single-token case.

use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Character-level similarity as a percentage.
fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

fn join_with_sect(sect: &str, rest: &str) -> String {
    if sect.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        sect.to_string()
    } else {
        format!("{sect} {rest}")
    }
}

/// Token-set similarity score between two strings, 0-100.
///
/// Symmetric, and 100 exactly for identical inputs. Callers pass normalized
/// text on both sides; the threshold decision is theirs, not this
/// function's.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let common: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let rest_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let rest_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // Equal token sets with different ordering or spacing.
    if !common.is_empty() && rest_a.is_empty() && rest_b.is_empty() {
        return 100;
    }

    let sect = common.join(" ");
    let combined_a = join_with_sect(&sect, &rest_a.join(" "));
    let combined_b = join_with_sect(&sect, &rest_b.join(" "));

    let best = ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b));

    best.round().clamp(0.0, 100.0) as u8
}
