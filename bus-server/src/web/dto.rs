//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Query, Route, RouteStatus};
use crate::matcher::SearchOutcome;

/// Request to search routes by destination.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text destination (e.g., "Howrah")
    pub destination: Option<String>,

    /// Maximum number of stop suggestions when nothing matches
    pub limit: Option<String>,
}

/// Request for type-ahead stop recommendations.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Partially typed stop name
    #[serde(default)]
    pub q: String,

    /// Maximum number of recommendations
    pub limit: Option<String>,
}

/// Request to filter the route list.
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    /// Text to look for in route names, descriptions and stops
    #[serde(default)]
    pub q: String,
}

/// A route in search results.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Route description
    pub route: Option<String>,

    /// Schedule text
    pub schedule: String,

    /// Fare text
    pub fare: String,

    /// First stop
    pub from: Option<String>,

    /// Last stop
    pub to: Option<String>,

    /// Stop count for display
    pub total_stops: String,

    /// Image reference
    pub image_url: Option<String>,

    /// Whether the route is operating
    pub status: RouteStatus,
}

/// Response for a destination search.
///
/// Tagged by `outcome` so clients can switch on it.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchResponse {
    /// Routes that stop at a matching place
    Matches {
        query: String,
        routes: Vec<RouteSummary>,
        exact_stop: bool,
        general_term: bool,
    },

    /// The query is too general; more specific stops to pick from
    TooGeneral { query: String, related: Vec<String> },

    /// The query is too short and matches no stop
    TooShort { query: String },

    /// Nothing matched; "did you mean" stop names
    Suggestions { query: String, stops: Vec<String> },
}

/// Type-ahead stop recommendations.
#[derive(Debug, Serialize)]
pub struct StopRecommendations {
    /// The term as typed
    pub query: String,

    /// Stop names, best first
    pub stops: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteSummary {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.as_str().to_string(),
            name: route.name.clone(),
            route: route.description.clone(),
            schedule: route.schedule.clone(),
            fare: route.fare.clone(),
            from: route.first_stop().map(str::to_string),
            to: route.last_stop().map(str::to_string),
            total_stops: route.stop_count_label(),
            image_url: route.image_url.clone(),
            status: route.status,
        }
    }
}

impl SearchResponse {
    /// Create from a matcher outcome.
    pub fn from_outcome(query: &Query, outcome: SearchOutcome<'_>) -> Self {
        let query = query.as_str().to_string();
        match outcome {
            SearchOutcome::Matches {
                routes,
                exact_stop,
                general_term,
            } => SearchResponse::Matches {
                query,
                routes: routes.into_iter().map(RouteSummary::from_route).collect(),
                exact_stop,
                general_term,
            },
            SearchOutcome::TooGeneral { related } => SearchResponse::TooGeneral { query, related },
            SearchOutcome::TooShort => SearchResponse::TooShort { query },
            SearchOutcome::Suggestions { stops } => SearchResponse::Suggestions { query, stops },
        }
    }
}
