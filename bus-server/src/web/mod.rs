//! Web layer for the bus route directory.
//!
//! Provides JSON endpoints for listing routes and searching by destination.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
