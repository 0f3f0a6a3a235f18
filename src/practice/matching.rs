//! Correctness check for the Tamil/English matching exercise.

use std::collections::HashMap;

use crate::domain::MatchPair;

/// All-or-nothing check of a submitted matching.
///
/// Every expected pair must be present in `matches` with the right partner;
/// a single missing or wrong match fails the whole exercise. Partial credit
/// is not supported.
pub fn matching_is_correct(pairs: &[MatchPair], matches: &HashMap<String, String>) -> bool {
    pairs
        .iter()
        .all(|pair| matches.get(&pair.tamil) == Some(&pair.english))
}
