//! Route search over a corpus of bus routes.
//!
//! The corpus is supplied fresh on every call. Nothing is indexed ahead of
//! time; the distinct-stop index and the per-stop verdict memo live only
//! for the duration of one call.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Query, Route};

use super::config::MatcherConfig;
use super::fuzzy::matches_normalized;
use super::text::{char_len, edit_distance, normalize, words};

/// Cap on suggestion distance regardless of query length.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Shortest term, in characters, that gets type-ahead recommendations.
const MIN_RECOMMEND_LEN: usize = 2;

/// Terms up to this many characters recommend by containment only.
const CONTAINMENT_ONLY_LEN: usize = 3;

/// Result of a destination search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// At least one route calls at a matching stop.
    Matches {
        /// Matching routes, in corpus order
        routes: Vec<&'a Route>,
        /// The query is exactly the name of a known stop
        exact_stop: bool,
        /// The query is a common word such as "college"
        general_term: bool,
    },

    /// The query is a common word; more specific stops that contain it.
    TooGeneral { related: Vec<String> },

    /// The query is under 3 characters and appears in no stop name.
    TooShort,

    /// No route matched; closest stop names, best first (may be empty).
    Suggestions { stops: Vec<String> },
}

/// Distinct stops of a corpus, deduplicated by normalized name.
///
/// Entries keep first-seen order and the first-seen spelling.
struct StopIndex<'a> {
    stops: Vec<(&'a str, String)>,
}

impl<'a> StopIndex<'a> {
    fn build(corpus: &'a [Route]) -> Self {
        let mut seen = HashSet::new();
        let mut stops = Vec::new();

        for stop in corpus.iter().flat_map(|r| r.stops.iter()) {
            let normalized = normalize(stop);
            if seen.insert(normalized.clone()) {
                stops.push((stop.as_str(), normalized));
            }
        }

        Self { stops }
    }

    fn contains_exact(&self, normalized_query: &str) -> bool {
        self.stops.iter().any(|(_, n)| n == normalized_query)
    }

    fn any_containing(&self, normalized_query: &str) -> bool {
        self.stops.iter().any(|(_, n)| n.contains(normalized_query))
    }

    /// Normalized stops that contain the word without being equal to it.
    fn qualified_by(&self, word: &str, limit: usize) -> Vec<String> {
        self.stops
            .iter()
            .filter(|(_, n)| n.contains(word) && n != word)
            .map(|(_, n)| n.clone())
            .take(limit)
            .collect()
    }

    /// Stops within suggestion distance of the query, best first.
    fn closest(&self, normalized_query: &str, limit: usize) -> Vec<String> {
        let max = MAX_SUGGESTION_DISTANCE.min(char_len(normalized_query).div_ceil(2));

        let mut scored: Vec<(usize, &str)> = self
            .stops
            .iter()
            .map(|(original, n)| (stop_distance(normalized_query, n), *original))
            .filter(|(d, _)| *d <= max)
            .collect();

        // Stable: equal distances keep first-seen order
        scored.sort_by_key(|(d, _)| *d);

        scored
            .into_iter()
            .take(limit)
            .map(|(_, s)| s.to_string())
            .collect()
    }

    /// Type-ahead candidates: stops containing the term first, then the
    /// rest, each group by distance to the whole stop name.
    fn recommend(&self, normalized_term: &str, config: &MatcherConfig, limit: usize) -> Vec<String> {
        let containment_only = char_len(normalized_term) <= CONTAINMENT_ONLY_LEN;

        let mut scored: Vec<(bool, usize, &str)> = self
            .stops
            .iter()
            .filter_map(|(original, n)| {
                let contained = n.contains(normalized_term);
                let keep = contained
                    || (!containment_only && matches_normalized(normalized_term, n, config));
                keep.then(|| (!contained, edit_distance(normalized_term, n), *original))
            })
            .collect();

        scored.sort_by_key(|(fuzzy_only, d, _)| (*fuzzy_only, *d));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, _, s)| s.to_string())
            .collect()
    }
}

/// Distance from a query to a stop name, for ranking suggestions.
///
/// The smaller of the distance to the whole name and the distance to any run
/// of consecutive stop words as long (in words) as the query. A misspelt
/// "howra" is thus one edit from "Howrah Station", not nine. The whole-name
/// distance is always an upper bound on the result.
pub(super) fn stop_distance(query: &str, stop: &str) -> usize {
    let whole = edit_distance(query, stop);

    let query_words = words(query).len();
    let stop_words = words(stop);
    if query_words == 0 || stop_words.len() <= query_words {
        return whole;
    }

    stop_words
        .windows(query_words)
        .map(|run| edit_distance(query, &run.join(" ")))
        .fold(whole, usize::min)
}

/// Fuzzy matcher over bus stop names.
///
/// Stateless between calls; share one instance freely.
#[derive(Debug, Clone, Default)]
pub struct StopMatcher {
    config: MatcherConfig,
}

impl StopMatcher {
    /// Create a matcher with the given configuration.
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// The matcher's configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Whether a stop name matches the query under this matcher's policy.
    pub fn is_match(&self, query: &str, stop: &str) -> bool {
        matches_normalized(&normalize(query), &normalize(stop), &self.config)
    }

    /// Routes with at least one stop matching the query, in corpus order.
    pub fn find_matching_routes<'a>(&self, corpus: &'a [Route], query: &Query) -> Vec<&'a Route> {
        let normalized_query = normalize(query.as_str());
        let mut verdicts: HashMap<&'a str, bool> = HashMap::new();

        corpus
            .iter()
            .filter(|route| {
                let route: &'a Route = *route;
                route.stops.iter().any(|stop| {
                    *verdicts.entry(stop.as_str()).or_insert_with(|| {
                        matches_normalized(&normalized_query, &normalize(stop), &self.config)
                    })
                })
            })
            .collect()
    }

    /// Up to `limit` stop names close to the query, best first.
    ///
    /// Stops are deduplicated by normalized name; the first spelling seen in
    /// the corpus is returned. Only stops within `min(3, ceil(len / 2))`
    /// edits are kept, where `len` is the query length in characters.
    pub fn suggest_stops(&self, corpus: &[Route], query: &Query, limit: usize) -> Vec<String> {
        StopIndex::build(corpus).closest(&normalize(query.as_str()), limit)
    }

    /// Type-ahead stop names for a partially typed term, best first.
    ///
    /// Terms under 2 characters get nothing. Terms of up to 3 characters
    /// only recommend stops containing them; longer terms also take fuzzy
    /// matches, ranked after every containing stop.
    pub fn recommend_stops(&self, corpus: &[Route], term: &str, limit: usize) -> Vec<String> {
        let normalized_term = normalize(term);
        if char_len(&normalized_term) < MIN_RECOMMEND_LEN {
            return Vec::new();
        }

        StopIndex::build(corpus).recommend(&normalized_term, &self.config, limit)
    }

    /// Full destination search using the configured suggestion limit.
    pub fn search<'a>(&self, corpus: &'a [Route], query: &Query) -> SearchOutcome<'a> {
        self.search_with_limit(corpus, query, self.config.suggestion_limit)
    }

    /// Full destination search.
    ///
    /// In order: a bare common word with more specific stops available is
    /// too general; a short query found in no stop is too short; otherwise
    /// matching routes, or suggestions when nothing matched.
    pub fn search_with_limit<'a>(
        &self,
        corpus: &'a [Route],
        query: &Query,
        suggestion_limit: usize,
    ) -> SearchOutcome<'a> {
        let normalized_query = normalize(query.as_str());
        let index = StopIndex::build(corpus);
        let general_term = self.config.is_common_word(&normalized_query);

        if general_term {
            let related = index.qualified_by(&normalized_query, self.config.general_limit);
            if !related.is_empty() {
                debug!(query = %query, related = related.len(), "query too general");
                return SearchOutcome::TooGeneral { related };
            }
        }

        if char_len(&normalized_query) < 3 && !index.any_containing(&normalized_query) {
            debug!(query = %query, "query too short");
            return SearchOutcome::TooShort;
        }

        let routes = self.find_matching_routes(corpus, query);
        if routes.is_empty() {
            let stops = index.closest(&normalized_query, suggestion_limit);
            debug!(query = %query, suggestions = stops.len(), "no matching routes");
            return SearchOutcome::Suggestions { stops };
        }

        debug!(query = %query, routes = routes.len(), "matched routes");
        SearchOutcome::Matches {
            routes,
            exact_stop: index.contains_exact(&normalized_query),
            general_term,
        }
    }

    /// Routes whose name, description or any stop contains the term,
    /// ignoring case. A blank term keeps every route.
    pub fn filter_routes<'a>(&self, corpus: &'a [Route], term: &str) -> Vec<&'a Route> {
        let needle = normalize(term);
        if needle.is_empty() {
            return corpus.iter().collect();
        }

        let contains = |text: &str| text.to_lowercase().contains(&needle);

        corpus
            .iter()
            .filter(|route| {
                contains(&route.name)
                    || route.description.as_deref().is_some_and(contains)
                    || route.stops.iter().any(|s| contains(s))
            })
            .collect()
    }
}

/// Routes with a stop matching the query, using the default matcher.
pub fn find_matching_routes<'a>(corpus: &'a [Route], query: &Query) -> Vec<&'a Route> {
    StopMatcher::default().find_matching_routes(corpus, query)
}

/// Closest stop names to the query, using the default matcher.
pub fn suggest_stops(corpus: &[Route], query: &Query, limit: usize) -> Vec<String> {
    StopMatcher::default().suggest_stops(corpus, query, limit)
}
