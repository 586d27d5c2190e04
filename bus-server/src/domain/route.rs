//! Bus route records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Opaque identifier of a route record.
///
/// Identifiers come from the catalog and are never interpreted, only
/// compared. The only requirement is that they are non-empty.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyRouteId);
        }
        Ok(RouteId(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        RouteId::parse(&s)
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a route is currently operating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    #[default]
    Active,
    Inactive,
}

/// A bus route: a named service with an ordered list of stops.
///
/// Stop order is physical order along the route. Stops are free text and
/// may repeat. Schedule and fare are descriptive text, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Catalog identifier
    #[serde(rename = "_id")]
    pub id: RouteId,

    /// Display name (e.g., "S-12")
    pub name: String,

    /// Route description (e.g., "Howrah to Saltlake")
    #[serde(rename = "route", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Stops in travel order
    #[serde(default)]
    pub stops: Vec<String>,

    /// Schedule text (e.g., "6:00 AM - 10:00 PM")
    #[serde(default)]
    pub schedule: String,

    /// Fare text (e.g., "₹10 - ₹25")
    #[serde(default)]
    pub fare: String,

    /// Image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Operating status
    #[serde(default)]
    pub status: RouteStatus,

    /// Declared stop count, as recorded by the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_stops: Option<String>,
}

impl Route {
    /// Create a route with the given id, name and stops.
    ///
    /// All other fields take their empty defaults.
    pub fn new(id: RouteId, name: impl Into<String>, stops: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            stops,
            schedule: String::new(),
            fare: String::new(),
            image_url: None,
            status: RouteStatus::Active,
            total_stops: None,
        }
    }

    /// Set the route description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// First stop on the route, if any.
    pub fn first_stop(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    /// Last stop on the route, if any.
    pub fn last_stop(&self) -> Option<&str> {
        self.stops.last().map(String::as_str)
    }

    /// Stop count for display.
    ///
    /// Uses the declared count when the catalog provides one, otherwise the
    /// length of the stop list.
    pub fn stop_count_label(&self) -> String {
        match &self.total_stops {
            Some(declared) if !declared.trim().is_empty() => declared.trim().to_string(),
            _ => self.stops.len().to_string(),
        }
    }

    /// Trim stops and drop blank ones, preserving order.
    pub fn tidy_stops(&mut self) {
        self.stops = self
            .stops
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
}
