//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{self, DomainError, Route, RouteId};

use super::dto::*;
use super::state::AppState;

/// Upper bound on suggestions or recommendations a client may ask for.
const MAX_RESULT_LIMIT: usize = 10;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/buses", get(list_routes))
        .route("/api/buses/filter", get(filter_routes))
        .route("/api/buses/:id", get(get_route))
        .route("/api/search", get(search))
        .route("/api/stops/recommend", get(recommend_stops))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every route in the catalog.
async fn list_routes(State(state): State<AppState>) -> Json<Vec<Route>> {
    let routes = state.catalog.all().await;
    Json(routes.as_ref().clone())
}

/// Routes whose name, description or stops contain the filter text.
async fn filter_routes(
    State(state): State<AppState>,
    Query(req): Query<FilterRequest>,
) -> Json<Vec<Route>> {
    let routes = state.catalog.all().await;
    let filtered = state
        .matcher
        .filter_routes(&routes, &req.q)
        .into_iter()
        .cloned()
        .collect();
    Json(filtered)
}

/// Fetch a single route by id.
async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Route>, AppError> {
    let not_found = || AppError::NotFound {
        message: format!("Bus not found: {id}"),
    };

    let route_id = RouteId::parse(&id).map_err(|_| not_found())?;
    let route = state.catalog.get(&route_id).await.ok_or_else(not_found)?;
    Ok(Json(route))
}

/// Search routes by destination.
///
/// Returns matching routes, or suggestions when nothing matches.
async fn search(
    State(state): State<AppState>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = domain::Query::parse(req.destination.as_deref().unwrap_or_default())?;
    let limit = parse_limit(req.limit.as_deref(), state.matcher.config().suggestion_limit)?;

    let routes = state.catalog.all().await;
    let outcome = state.matcher.search_with_limit(&routes, &query, limit);

    Ok(Json(SearchResponse::from_outcome(&query, outcome)))
}

/// Type-ahead stop names for a partially typed term.
async fn recommend_stops(
    State(state): State<AppState>,
    Query(req): Query<RecommendRequest>,
) -> Result<Json<StopRecommendations>, AppError> {
    let limit = parse_limit(req.limit.as_deref(), state.matcher.config().recommend_limit)?;

    let routes = state.catalog.all().await;
    let stops = state.matcher.recommend_stops(&routes, &req.q, limit);

    Ok(Json(StopRecommendations {
        query: req.q.trim().to_string(),
        stops,
    }))
}

/// Parse an optional `limit` parameter, capped at [`MAX_RESULT_LIMIT`].
///
/// Missing or blank values take `default`.
fn parse_limit(raw: Option<&str>, default: usize) -> Result<usize, AppError> {
    let limit = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => default,
        Some(raw) => raw.parse::<usize>().map_err(|e| AppError::BadRequest {
            message: format!("Invalid limit {raw:?}: {e}"),
        })?,
    };

    Ok(limit.min(MAX_RESULT_LIMIT))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::catalog::RouteCatalog;
    use crate::matcher::{MatchPolicy, MatcherConfig, StopMatcher};

    fn route(id: &str, name: &str, stops: &[&str]) -> Route {
        Route::new(
            RouteId::parse(id).unwrap(),
            name,
            stops.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn app_with(matcher: StopMatcher) -> Router {
        let catalog = RouteCatalog::from_routes(vec![
            route("s12", "S-12", &["Howrah Station", "Esplanade", "Saltlake"]),
            route("ac9", "AC-9", &["Champadali Bus Stand", "Dunlop"]),
            route("e32", "E-32", &["BT College", "Ultadanga", "Perk Lane"]),
        ]);
        create_router(AppState::new(catalog, matcher))
    }

    fn app() -> Router {
        app_with(StopMatcher::default())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn list_all_routes() {
        let (status, json) = get_json(app(), "/api/buses").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["_id"], "s12");
    }

    #[tokio::test]
    async fn get_route_by_id() {
        let (status, json) = get_json(app(), "/api/buses/ac9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "AC-9");

        let (status, json) = get_json(app(), "/api/buses/zz1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Bus not found: zz1");
    }

    #[tokio::test]
    async fn filter_routes_by_text() {
        let (status, json) = get_json(app(), "/api/buses/filter?q=dunlop").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["_id"], "ac9");

        let (_, json) = get_json(app(), "/api/buses/filter").await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn search_matches() {
        let (status, json) = get_json(app(), "/api/search?destination=howra").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "matches");
        assert_eq!(json["routes"][0]["id"], "s12");
        assert_eq!(json["routes"][0]["to"], "Saltlake");
    }

    #[tokio::test]
    async fn search_suggestions_respect_limit() {
        // Two edits from "dunlop": too far to match, close enough to suggest
        let (status, json) = get_json(app(), "/api/search?destination=dnlp&limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["outcome"], "suggestions");
        assert_eq!(json["stops"], serde_json::json!(["Dunlop"]));
    }

    #[tokio::test]
    async fn search_too_general_and_too_short() {
        let (_, json) = get_json(app(), "/api/search?destination=College").await;
        assert_eq!(json["outcome"], "too_general");
        assert_eq!(json["related"], serde_json::json!(["bt college"]));

        let (_, json) = get_json(app(), "/api/search?destination=zq").await;
        assert_eq!(json["outcome"], "too_short");
    }

    #[tokio::test]
    async fn search_requires_destination() {
        let (status, json) = get_json(app(), "/api/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "query must not be empty");

        let (status, _) = get_json(app(), "/api/search?destination=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_uses_configured_policy() {
        let strict = StopMatcher::new(MatcherConfig::new(MatchPolicy::Strict, 3));

        // "park" is one edit from "Perk"; only the strict common-word gate refuses it
        let (_, lenient) = get_json(app(), "/api/search?destination=park").await;
        assert_eq!(lenient["outcome"], "matches");
        assert_eq!(lenient["routes"][0]["id"], "e32");

        let (_, strict) = get_json(app_with(strict), "/api/search?destination=park").await;
        assert_eq!(strict["outcome"], "suggestions");
        assert_eq!(strict["stops"], serde_json::json!(["Perk Lane"]));
    }

    #[tokio::test]
    async fn invalid_limit_is_json_bad_request() {
        let (status, json) = get_json(app(), "/api/search?destination=dnlp&limit=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid limit \"abc\""));

        let (status, _) = get_json(app(), "/api/stops/recommend?q=dun&limit=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_limit_takes_default() {
        let (status, json) = get_json(app(), "/api/search?destination=dnlp&limit=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stops"], serde_json::json!(["Dunlop"]));
    }

    #[tokio::test]
    async fn recommend_stops_endpoint() {
        let (status, json) = get_json(app(), "/api/stops/recommend?q=%20esp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["query"], "esp");
        assert_eq!(json["stops"], serde_json::json!(["Esplanade"]));

        let (_, json) = get_json(app(), "/api/stops/recommend?q=h").await;
        assert_eq!(json["stops"], serde_json::json!([]));

        let (_, json) = get_json(app(), "/api/stops/recommend").await;
        assert_eq!(json["stops"], serde_json::json!([]));
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(parse_limit(None, 3).unwrap(), 3);
        assert_eq!(parse_limit(Some(" 7 "), 3).unwrap(), 7);
        assert_eq!(parse_limit(Some("50"), 3).unwrap(), MAX_RESULT_LIMIT);
        assert!(matches!(
            parse_limit(Some("many"), 3),
            Err(AppError::BadRequest { .. })
        ));
    }
}
