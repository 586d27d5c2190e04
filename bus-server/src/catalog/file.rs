//! JSON catalog file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::Route;

use super::error::CatalogError;

/// Default catalog location, relative to the working directory.
const DEFAULT_PATH: &str = "buses.json";

/// A JSON file holding an array of route records.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    /// Create a catalog file handle for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the catalog.
    pub async fn load(&self) -> Result<Vec<Route>, CatalogError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: self.path.clone(),
                    source,
                })?;

        self.parse(&contents)
    }

    /// Parse catalog contents.
    ///
    /// Stops are trimmed and blank stops dropped. When two records share an
    /// id, the first wins and the later one is skipped.
    pub fn parse(&self, contents: &str) -> Result<Vec<Route>, CatalogError> {
        let routes: Vec<Route> =
            serde_json::from_str(contents).map_err(|source| CatalogError::Json {
                path: self.path.clone(),
                source,
            })?;

        Ok(tidy(routes))
    }
}

impl Default for CatalogFile {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

/// Drop duplicate ids and tidy stop lists.
fn tidy(routes: Vec<Route>) -> Vec<Route> {
    let mut seen = HashSet::new();

    routes
        .into_iter()
        .filter_map(|mut route| {
            if !seen.insert(route.id.clone()) {
                warn!(id = %route.id, name = %route.name, "skipping duplicate route id");
                return None;
            }
            route.tidy_stops();
            Some(route)
        })
        .collect()
}
