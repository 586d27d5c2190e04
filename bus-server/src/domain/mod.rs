//! Core domain types for the bus route directory.
//!
//! These types describe routes and search queries independently of where
//! they come from (catalog file) or how they are served (web layer).

mod error;
mod query;
mod route;

pub use error::DomainError;
pub use query::Query;
pub use route::{Route, RouteId, RouteStatus};
