//! Fuzzy matching of destination queries against bus stop names.
//!
//! This module answers: "which routes stop at the place I typed?", and when
//! none do, "which stop names did I probably mean?"
//!
//! Matching is a pure function of the query and the corpus. Short queries
//! must appear verbatim in a stop name; longer ones tolerate a few typos per
//! word, measured by Levenshtein edit distance.

mod config;
mod fuzzy;
mod search;
mod text;


pub use config::{DEFAULT_COMMON_WORDS, MatchPolicy, MatcherConfig, UnknownPolicy};
pub use fuzzy::is_fuzzy_match;
pub use search::{SearchOutcome, StopMatcher, find_matching_routes, suggest_stops};
pub use text::{edit_distance, normalize};
