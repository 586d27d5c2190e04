//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::RouteCatalog;
use crate::matcher::StopMatcher;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route catalog
    pub catalog: RouteCatalog,

    /// Stop matcher
    pub matcher: Arc<StopMatcher>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: RouteCatalog, matcher: StopMatcher) -> Self {
        Self {
            catalog,
            matcher: Arc::new(matcher),
        }
    }
}
