//! Search query type.

use std::fmt;

use super::DomainError;

/// A destination query: free text, trimmed and non-empty.
///
/// The matcher assumes its query is non-empty after trimming. This type
/// guarantees that by construction, so callers validate once at the edge.
///
/// # Examples
///
/// ```
/// use bus_server::domain::Query;
///
/// let q = Query::parse("  Howrah ").unwrap();
/// assert_eq!(q.as_str(), "Howrah");
///
/// assert!(Query::parse("").is_err());
/// assert!(Query::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Parse a query, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Query(trimmed.to_string()))
    }

    /// Returns the trimmed query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the trimmed query in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Query({:?})", self.0)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
