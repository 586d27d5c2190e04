//! Shared in-memory route catalog.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{Route, RouteId};

use super::error::CatalogError;
use super::file::CatalogFile;

/// Thread-safe route catalog.
///
/// Holds the full route list with support for background reload. Readers
/// take a snapshot and never hold the lock while matching.
#[derive(Clone)]
pub struct RouteCatalog {
    inner: Arc<RwLock<Arc<Vec<Route>>>>,
    source: Option<CatalogFile>,
}

impl RouteCatalog {
    /// Create a catalog by reading the given file.
    ///
    /// This will fail if the file is missing or malformed.
    pub async fn load(source: CatalogFile) -> Result<Self, CatalogError> {
        let routes = source.load().await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(routes))),
            source: Some(source),
        })
    }

    /// Create a fixed catalog from routes already in memory.
    ///
    /// Reloading such a catalog is a no-op.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(routes))),
            source: None,
        }
    }

    /// Snapshot of all routes, in catalog order.
    pub async fn all(&self) -> Arc<Vec<Route>> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Look up a route by id.
    pub async fn get(&self, id: &RouteId) -> Option<Route> {
        let guard = self.inner.read().await;
        guard.iter().find(|r| &r.id == id).cloned()
    }

    /// Get the number of routes in the catalog.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.is_empty()
    }

    /// Reload routes from the catalog file.
    ///
    /// On success, replaces the current routes and returns the new count. On
    /// failure, the existing routes are preserved and the error is returned.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let Some(source) = &self.source else {
            return Ok(self.len().await);
        };

        let routes = source.load().await?;
        let count = routes.len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(routes);

        Ok(count)
    }
}
