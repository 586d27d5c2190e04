//! Route catalog: the corpus of bus routes the matcher searches.
//!
//! Routes are read from a JSON file at startup and can be reloaded in the
//! background without interrupting readers.

mod error;
mod file;
mod store;

pub use error::CatalogError;
pub use file::CatalogFile;
pub use store::RouteCatalog;
