use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::discovery::{
    cuisines, refine, seed_places, DiscoveryError, DiscoverySource, GeoPoint, ListingQuery,
    PointOfInterest, SortKey, DEFAULT_RADIUS_KM,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<DiscoveryError> for ApiError {
    fn from(e: DiscoveryError) -> Self {
        match e {
            DiscoveryError::InvalidArgument(_) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/health ─────────────────────────────────────────────

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ─── GET /api/restaurants ────────────────────────────────────────

#[derive(Deserialize)]
pub struct RestaurantsQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub place: Option<String>,
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<PointOfInterest>,
    pub total: usize,
    pub source: DiscoverySource,
    pub reference: Option<GeoPoint>,
    pub cuisines: Vec<String>,
}

pub async fn restaurants(
    State(state): State<Arc<AppState>>,
    params: Result<Query<RestaurantsQuery>, QueryRejection>,
) -> Result<Json<RestaurantsResponse>, ApiError> {
    let start = Instant::now();
    let Query(params) = params.map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;

    let reference = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        (None, None) => None,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Provide both 'lat' and 'lng', or neither",
            ))
        }
    };
    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_KM);
    let sort = match params.sort.as_deref() {
        Some(s) => s.parse::<SortKey>().map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => SortKey::default(),
    };

    // Provider calls block on network I/O.
    let place = params.place.clone();
    let worker_state = Arc::clone(&state);
    let discovery = tokio::task::spawn_blocking(move || {
        worker_state
            .service
            .discover_with_source(reference, radius, place.as_deref())
    })
    .await
    .map_err(|e| {
        error!(error = %e, "discovery worker failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to discover restaurants")
    })??;

    let available = cuisines(&discovery.places);
    let listing = ListingQuery {
        search: params.search,
        cuisine: params.cuisine,
        sort,
    };
    let restaurants = refine(discovery.places, &listing);

    info!(
        reference = ?discovery.reference,
        radius,
        source = %discovery.source,
        count = restaurants.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/restaurants"
    );

    Ok(Json(RestaurantsResponse {
        total: restaurants.len(),
        restaurants,
        source: discovery.source,
        reference: discovery.reference,
        cuisines: available,
    }))
}

// ─── GET /api/restaurants/seed ───────────────────────────────────

pub async fn seed_list() -> Json<Vec<PointOfInterest>> {
    Json(seed_places())
}
