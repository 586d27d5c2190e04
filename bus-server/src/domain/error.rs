//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from catalog and IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Query text was empty after trimming
    #[error("query must not be empty")]
    EmptyQuery,

    /// Route identifier was empty after trimming
    #[error("route id must not be empty")]
    EmptyRouteId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DomainError::EmptyQuery.to_string(), "query must not be empty");
        assert_eq!(
            DomainError::EmptyRouteId.to_string(),
            "route id must not be empty"
        );
    }
}
