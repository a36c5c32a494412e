//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::catalog::{CatalogError, CatalogSummary, RateCatalog};
use crate::domain::DomainError;
use crate::quote::{Quote, QuoteRequest, RouteQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(catalog_summary).put(replace_catalog))
        .route("/quote", post(quote))
        .route("/best-price", post(best_price))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Describe the loaded catalog.
async fn catalog_summary(State(state): State<AppState>) -> Json<CatalogResponse> {
    let snapshot = state.catalog.snapshot().await;
    Json(CatalogResponse {
        summary: snapshot.catalog.summary(),
        loaded_at: snapshot.loaded_at,
    })
}

/// Replace the whole catalog. The previous catalog stays if the new one is
/// rejected.
async fn replace_catalog(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CatalogSummary>, AppError> {
    let catalog: RateCatalog = parse_body(&body)?;
    let summary = state.catalog.replace(catalog).await?;

    let advisor = state.quotes.advisor();
    let stale_advice = advisor.cached_replies();
    advisor.forget_replies();
    info!(
        sea = summary.sea_coc + summary.sea_soc,
        rail = summary.rail,
        stale_advice,
        "Catalog replaced over HTTP"
    );
    Ok(Json(summary))
}

/// Quote a single request.
async fn quote(State(state): State<AppState>, body: Bytes) -> Result<Json<Quote>, AppError> {
    let request: QuoteRequest = parse_body(&body)?;
    let quote = state.quotes.quote(&request).await?;
    Ok(Json(quote))
}

/// Rank the cheapest options for a route query.
async fn best_price(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BestPriceResponse>, AppError> {
    let query: RouteQuery = parse_body(&body)?;
    let candidates = state.quotes.best_price(&query).await?;
    Ok(Json(BestPriceResponse::from(candidates)))
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "JSON parse error");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Io(_) => AppError::Internal {
                message: e.to_string(),
            },
            CatalogError::Json { .. } | CatalogError::InvalidRecord { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
