//! HTTP handlers and router assembly

use std::sync::Arc;

use axum::error_handling::HandleErrorLayer;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{BoxError, Json, Router};
use campusnav_core::prelude::*;
use geo::Point;
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerSettings;
use crate::error::ApiError;

pub type AppState = Arc<CampusModel>;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub start: LatLng,
    /// Destination id from the catalog
    pub destination: String,
    pub mode: String,
    /// Catalog id of the start, for gate checks
    #[serde(default)]
    pub start_destination: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DestinationQuery {
    pub category: Option<String>,
}

pub fn router(model: AppState, settings: &ServerSettings) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(settings.request_timeout())
        .layer(GlobalConcurrencyLimitLayer::new(settings.concurrency_limit));

    Router::new()
        .route("/health", get(health))
        .route("/destinations", get(destinations))
        .route("/route", post(route))
        .route("/route/geojson", post(route_geojson))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(model)
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({"error": "request timed out"})),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": format!("unhandled internal error: {err}")})),
        )
    }
}

async fn health(State(model): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "nodes": model.node_count(),
        "edges": model.edge_count(),
        "destinations": model.destination_count(),
    }))
}

async fn destinations(
    State(model): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    let destinations = match query.category {
        Some(category) => {
            let category: Category = category.parse()?;
            model.catalog.by_category(category).cloned().collect()
        }
        None => model.catalog.iter().cloned().collect(),
    };
    Ok(Json(destinations))
}

async fn route(
    State(model): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<HybridRoute>, ApiError> {
    let route = plan(model, payload).await?;
    Ok(Json(route))
}

async fn route_geojson(
    State(model): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<geojson::FeatureCollection>, ApiError> {
    let route = plan(model, payload).await?;
    Ok(Json(route.to_geojson()?))
}

/// Validates the request and runs the planner off the async workers
async fn plan(
    model: AppState,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<HybridRoute, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let mode: Mode = request.mode.parse()?;
    let LatLng { lat, lng } = request.start;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(ApiError::BadRequest(format!(
            "start coordinate ({lat}, {lng}) is out of range"
        )));
    }

    tracing::debug!(
        "Planning {mode} route to {} from ({lat}, {lng})",
        request.destination
    );
    let route = tokio::task::spawn_blocking(move || {
        RoutePlanner::new(&model).plan_by_id(
            Point::new(lng, lat),
            &request.destination,
            mode,
            request.start_destination.as_deref(),
        )
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(route)
}
