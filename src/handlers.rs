use crate::errors::AppError;
use crate::models::{
    ErrorBody, HealthResponse, QueryPairs, RatingParams, RatingResponse, SearchParams,
    SearchResponse,
};
use crate::services::CertificateService;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only pool over the certificate database.
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    fn certificates(&self) -> CertificateService {
        CertificateService::new(self.db.clone())
    }
}

/// GET /api/search
///
/// Lists every address under a postcode, numbered addresses first in
/// numeric order.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Addresses for the postcode", body = SearchResponse),
        (status = 400, description = "Postcode missing or blank", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    ),
    tag = "certificates"
)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<SearchResponse>, AppError> {
    let params = SearchParams::from_pairs(&pairs);
    tracing::info!("GET /api/search - postcode: {:?}", params.postcode);

    let postcode = params.postcode.unwrap_or_default();
    let response = state.certificates().search_addresses(&postcode).await?;

    Ok(Json(response))
}

/// GET /api/rating
///
/// Energy rating of one property plus its improvement recommendations,
/// cheapest first.
#[utoipa::path(
    get,
    path = "/api/rating",
    params(RatingParams),
    responses(
        (status = 200, description = "Rating and recommendations", body = RatingResponse),
        (status = 400, description = "Postcode or address missing", body = ErrorBody),
        (status = 404, description = "No certificate for this address", body = ErrorBody),
        (status = 500, description = "Database error", body = ErrorBody)
    ),
    tag = "certificates"
)]
pub async fn rating(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Json<RatingResponse>, AppError> {
    let params = RatingParams::from_pairs(&pairs);
    tracing::info!(
        "GET /api/rating - postcode: {:?}, address: {:?}",
        params.postcode,
        params.address
    );

    let postcode = params.postcode.unwrap_or_default();
    let address = params.address.unwrap_or_default();
    let response = state.certificates().get_rating(&postcode, &address).await?;

    tracing::info!(
        "Rating for {} / {}: {:?} ({} recommendations)",
        response.postcode,
        response.address,
        response.rating,
        response.recommendations.len()
    );

    Ok(Json(response))
}

/// GET /api/health
///
/// 200 when the database answers, 500 with the error otherwise.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let report = state.certificates().check_health().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(report))
}
