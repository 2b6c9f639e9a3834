//! HTTP route handlers for the recommendation API.

use crate::catalog::{CatalogRow, SearchParams};
use crate::engine::Recommendation;
use crate::error::RecError;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

// --- Request/Response types ---

#[derive(Deserialize)]
pub struct RecommendationRequest {
    pub restaurant_name: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,
}

fn default_top_n() -> usize {
    10
}

fn default_min_similarity() -> f32 {
    0.3
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub location: Option<String>,
    pub cuisine: Option<String>,
    pub min_rating: Option<f32>,
    pub max_cost: Option<f32>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<CatalogRow>,
    pub total_results: usize,
    pub search_time_ms: f64,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub total_recommendations: u64,
    pub total_not_found: u64,
    pub total_searches: u64,
    pub total_analytics: u64,
    pub avg_recommend_latency_us: f64,
    pub p50_recommend_latency_us: f64,
    pub p95_recommend_latency_us: f64,
    pub p99_recommend_latency_us: f64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Map a core error to the HTTP status the caller should see.
fn status_for(e: &RecError) -> StatusCode {
    match e {
        RecError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        RecError::RestaurantNotFound { .. } | RecError::NoSimilarRestaurants => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// --- Router ---

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/recommendations", post(recommendations))
        .route("/search", post(search))
        .route("/analytics", get(analytics))
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

// --- Handlers ---

async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<Recommendation>, (StatusCode, Json<ErrorResponse>)> {
    if req.top_n < 1 || req.top_n > 50 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "top_n must be between 1 and 50",
        ));
    }
    if !(0.0..=1.0).contains(&req.min_similarity) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "min_similarity must be between 0.0 and 1.0",
        ));
    }

    let start = Instant::now();
    let result = state
        .service
        .recommend(&req.restaurant_name, req.top_n, req.min_similarity);
    let elapsed = start.elapsed();

    match result {
        Ok(recommendation) => {
            if let Ok(mut metrics) = state.metrics.write() {
                metrics.record_recommendation(elapsed);
            }
            Ok(Json(recommendation))
        }
        Err(e) => {
            if matches!(e, RecError::RestaurantNotFound { .. }) {
                if let Ok(mut metrics) = state.metrics.write() {
                    metrics.record_not_found();
                }
            }
            Err(error_response(status_for(&e), e.to_string()))
        }
    }
}

async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.limit < 1 || req.limit > 100 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "limit must be between 1 and 100",
        ));
    }

    let params = SearchParams {
        query: req.query.clone(),
        location: req.location,
        cuisine: req.cuisine,
        min_rating: req.min_rating,
        max_cost: req.max_cost,
        limit: req.limit,
    };

    let start = Instant::now();
    let results = state
        .service
        .search(&params)
        .map_err(|e| error_response(status_for(&e), e.to_string()))?;
    let elapsed = start.elapsed();

    if let Ok(mut metrics) = state.metrics.write() {
        metrics.record_search();
    }

    Ok(Json(SearchResponse {
        query: req.query,
        total_results: results.len(),
        results,
        search_time_ms: elapsed.as_secs_f64() * 1000.0,
    }))
}

async fn analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<crate::analytics::AnalyticsReport>, (StatusCode, Json<ErrorResponse>)> {
    let report = state
        .service
        .analyze()
        .map_err(|e| error_response(status_for(&e), e.to_string()))?;

    if let Ok(mut metrics) = state.metrics.write() {
        metrics.record_analytics();
    }

    Ok(Json(report))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: state.service.is_ready(),
    })
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    let metrics = state.metrics.read().unwrap();

    Json(MetricsResponse {
        total_recommendations: metrics.total_recommendations(),
        total_not_found: metrics.total_not_found(),
        total_searches: metrics.total_searches(),
        total_analytics: metrics.total_analytics(),
        avg_recommend_latency_us: metrics.avg_recommend_latency_us(),
        p50_recommend_latency_us: metrics.percentile_recommend_latency_us(50.0),
        p95_recommend_latency_us: metrics.percentile_recommend_latency_us(95.0),
        p99_recommend_latency_us: metrics.percentile_recommend_latency_us(99.0),
    })
}
