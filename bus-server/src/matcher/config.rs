//! Matcher configuration.

use std::str::FromStr;

/// Generic place words that are too unspecific to search for on their own.
pub const DEFAULT_COMMON_WORDS: &[&str] = &[
    "college", "school", "hospital", "station", "market", "road", "street", "park", "mall", "bus",
    "stop",
];

/// Which fuzzy-match policy to apply to long queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Per-word tolerance of `max(1, len / 3)` edits.
    #[default]
    Lenient,

    /// Common-word gating, a 75% similarity floor for short single words,
    /// and a per-word tolerance of `min(2, len * 0.3)` edits.
    Strict,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match policy: {0} (expected \"lenient\" or \"strict\")")]
pub struct UnknownPolicy(String);

impl FromStr for MatchPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(MatchPolicy::Lenient),
            "strict" => Ok(MatchPolicy::Strict),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Configuration parameters for stop matching.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Fuzzy-match policy for queries of 3 or more characters.
    pub policy: MatchPolicy,

    /// Maximum number of "did you mean" stop suggestions.
    pub suggestion_limit: usize,

    /// Maximum number of related stops offered for a too-general query.
    pub general_limit: usize,

    /// Maximum number of type-ahead stop recommendations.
    pub recommend_limit: usize,

    /// Words treated as too general to search for alone (lower-case).
    pub common_words: Vec<String>,
}

impl MatcherConfig {
    /// Create a configuration with the given policy and suggestion limit.
    ///
    /// Other parameters take their defaults.
    pub fn new(policy: MatchPolicy, suggestion_limit: usize) -> Self {
        Self {
            policy,
            suggestion_limit,
            ..Self::default()
        }
    }

    /// Whether the normalized text is one of the common words.
    pub fn is_common_word(&self, normalized: &str) -> bool {
        self.common_words.iter().any(|w| w == normalized)
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::Lenient,
            suggestion_limit: 3,
            general_limit: 5,
            recommend_limit: 5,
            common_words: DEFAULT_COMMON_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}
