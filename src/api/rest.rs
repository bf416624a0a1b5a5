// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// The full surface the dashboard front-end consumes, mounted under `/api`.
// Authentication lives in the front-end's identity provider and never reaches
// this service, so every endpoint is public.  CORS is configured permissively
// for development; tighten `allowed_origins` in production.
//
// Error bodies use `{ "detail": ... }`, matching what the front-end's fetch
// layer surfaces to the user.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::indicators::{merge_indicators, normalize_series};

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/companies", get(companies))
        .route("/api/historical", get(historical))
        .route("/api/quote", get(quote))
        .route("/api/predict", get(predict))
        .route("/api/indicators", get(indicators))
        .route("/api/favorites", get(favorites_list))
        .route("/api/favorites/:ticker", post(favorites_add))
        .route("/api/favorites/:ticker", delete(favorites_remove))
        .route("/api/favorites/:ticker/toggle", post(favorites_toggle))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Common pieces
// =============================================================================

#[derive(Deserialize)]
struct TickerQuery {
    ticker: String,
}

#[derive(Deserialize)]
struct PredictQuery {
    ticker: String,
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

fn bad_gateway(err: anyhow::Error) -> (StatusCode, Json<ErrorBody>) {
    warn!(error = %err, "upstream data fetch failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorBody {
            detail: err.to_string(),
        }),
    )
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    remote_mode: bool,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        remote_mode: state.market.is_remote(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Market data
// =============================================================================

async fn companies(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.market.companies().await {
        Ok(list) => Json(list).into_response(),
        Err(e) => bad_gateway(e).into_response(),
    }
}

async fn historical(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TickerQuery>,
) -> impl IntoResponse {
    match state.market.historical(&q.ticker).await {
        Ok(records) => Json(&*records).into_response(),
        Err(e) => bad_gateway(e).into_response(),
    }
}

async fn quote(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TickerQuery>,
) -> impl IntoResponse {
    Json(state.market.quote(&q.ticker).await)
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PredictQuery>,
) -> impl IntoResponse {
    if NaiveDate::from_ymd_opt(q.year, q.month, q.day).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                detail: format!(
                    "invalid prediction date {:04}-{:02}-{:02}",
                    q.year, q.month, q.day
                ),
            }),
        )
            .into_response();
    }
    match state
        .market
        .prediction(&q.ticker, q.year, q.month, q.day)
        .await
    {
        Ok(prediction) => Json(prediction).into_response(),
        Err(e) => bad_gateway(e).into_response(),
    }
}

// =============================================================================
// Indicators
// =============================================================================

/// Full merged indicator chart for one ticker.
///
/// The indicator pipeline is pure and fast (a few hundred weekly samples),
/// so the whole computation runs synchronously inside the handler — one
/// atomic pass, never partially observable.
async fn indicators(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TickerQuery>,
) -> impl IntoResponse {
    match state.market.historical(&q.ticker).await {
        Ok(records) => {
            let points = normalize_series(&records);
            let chart = merge_indicators(&points);
            Json(chart).into_response()
        }
        Err(e) => bad_gateway(e).into_response(),
    }
}

// =============================================================================
// Favorites
// =============================================================================

async fn favorites_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.favorites.list())
}

async fn favorites_add(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> impl IntoResponse {
    match state.favorites.add(&ticker) {
        Ok(()) => {
            info!(ticker = %ticker, "favorite added");
            Json(state.favorites.list()).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                detail: e.to_string(),
            }),
        )
            .into_response(),
    }
}

#[derive(Serialize)]
struct ToggleResponse {
    ticker: String,
    favorite: bool,
}

async fn favorites_toggle(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> impl IntoResponse {
    match state.favorites.toggle(&ticker) {
        Ok(favorite) => {
            info!(ticker = %ticker, favorite, "favorite toggled");
            Json(ToggleResponse { ticker, favorite }).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                detail: e.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn favorites_remove(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> impl IntoResponse {
    match state.favorites.remove(&ticker) {
        Ok(()) => {
            info!(ticker = %ticker, "favorite removed");
            Json(state.favorites.list()).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                detail: e.to_string(),
            }),
        )
            .into_response(),
    }
}
