//! The fuzzy stop-name match predicate.
//!
//! Short queries must appear verbatim (after normalization). Longer queries
//! match on direct containment, or word by word within a small edit
//! distance, so that "Howra" finds "Howrah Station" but "BT" does not find
//! every stop with a "b" and a "t" in it.

use super::config::{MatchPolicy, MatcherConfig};
use super::text::{char_len, edit_distance, normalize, words};

/// Queries shorter than this (in characters) only match by containment.
const MIN_FUZZY_LEN: usize = 3;

/// Strict policy: single-word queries up to this length use a similarity ratio.
const STRICT_SHORT_WORD_LEN: usize = 4;

/// Strict policy: minimum similarity for short single-word queries.
const STRICT_MIN_SIMILARITY: f64 = 0.75;

/// Whether `candidate` fuzzily matches `query` under the default policy.
///
/// Both inputs are normalized first.
///
/// # Examples
///
/// ```
/// use bus_server::matcher::is_fuzzy_match;
///
/// assert!(is_fuzzy_match("bt", "BT College"));
/// assert!(!is_fuzzy_match("xy", "BT College"));
/// assert!(is_fuzzy_match("Howra", "Howrah Station"));
/// assert!(!is_fuzzy_match("xyz abc", "Howrah Station"));
/// ```
pub fn is_fuzzy_match(query: &str, candidate: &str) -> bool {
    matches_normalized(
        &normalize(query),
        &normalize(candidate),
        &MatcherConfig::default(),
    )
}

/// Match predicate over already-normalized text.
pub(crate) fn matches_normalized(query: &str, candidate: &str, config: &MatcherConfig) -> bool {
    if config.policy == MatchPolicy::Strict && !passes_common_word_gate(query, candidate, config)
    {
        return false;
    }

    if char_len(query) < MIN_FUZZY_LEN {
        return candidate.contains(query);
    }

    if candidate.contains(query) {
        return true;
    }

    let query_words = words(query);
    let candidate_words = words(candidate);

    if config.policy == MatchPolicy::Strict
        && query_words.len() == 1
        && char_len(query) <= STRICT_SHORT_WORD_LEN
    {
        return short_word_similar(query, &candidate_words);
    }

    if query_words.len() > 1 && !any_word_contained(&query_words, &candidate_words) {
        return false;
    }

    query_words
        .iter()
        .filter(|w| char_len(w) >= MIN_FUZZY_LEN)
        .all(|w| {
            let max = max_word_distance(w, config.policy);
            candidate_words.iter().any(|c| edit_distance(w, c) <= max)
        })
}

/// Edit distance tolerated between one query word and one candidate word.
fn max_word_distance(word: &str, policy: MatchPolicy) -> usize {
    let len = char_len(word);
    match policy {
        MatchPolicy::Lenient => (len / 3).max(1),
        MatchPolicy::Strict => (len * 3 / 10).min(2),
    }
}

/// At least one query word of 3+ characters appears inside a candidate word.
fn any_word_contained(query_words: &[&str], candidate_words: &[&str]) -> bool {
    query_words
        .iter()
        .filter(|w| char_len(w) >= MIN_FUZZY_LEN)
        .any(|w| candidate_words.iter().any(|c| c.contains(w)))
}

/// A common word alone ("college") only matches stops that qualify it.
///
/// Passes when the candidate is exactly the word, when a candidate word
/// contains it as part of a longer word ("supermarket"), or when it stands
/// as a whole word next to other words ("bt college").
fn passes_common_word_gate(query: &str, candidate: &str, config: &MatcherConfig) -> bool {
    if !config.is_common_word(query) || candidate == query {
        return true;
    }

    let candidate_words = words(candidate);
    let compound = candidate_words
        .iter()
        .any(|w| w.contains(query) && *w != query);
    if compound {
        return true;
    }

    candidate_words.len() > 1 && candidate_words.contains(&query)
}

/// Strict policy check for a single 3-4 character query word.
fn short_word_similar(query: &str, candidate_words: &[&str]) -> bool {
    let query_len = char_len(query);
    let mut best = 0.0_f64;

    for word in candidate_words {
        if word.contains(query) {
            return true;
        }
        let longest = query_len.max(char_len(word));
        let similarity = 1.0 - edit_distance(query, word) as f64 / longest as f64;
        best = best.max(similarity);
    }

    best >= STRICT_MIN_SIMILARITY
}
