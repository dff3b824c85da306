//! Router assembly and API documentation.

use crate::handlers::{self, AppState};
use crate::models::{ErrorBody, HealthResponse, RatingResponse, Recommendation, SearchResponse};
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EPC Lookup API",
        description = "Energy performance certificate lookups by postcode and address"
    ),
    paths(handlers::search, handlers::rating, handlers::health),
    components(schemas(
        SearchResponse,
        RatingResponse,
        Recommendation,
        HealthResponse,
        ErrorBody
    )),
    tags(
        (name = "certificates", description = "Address search and rating lookup"),
        (name = "health", description = "Database connectivity")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document as JSON.
async fn serve_openapi_spec() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Serves a Swagger UI page pointed at [`serve_openapi_spec`].
async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>EPC Lookup API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}

/// Builds the full application router.
///
/// Requests taking longer than `request_timeout` are answered with 408.
pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/api/search", get(handlers::search))
        .route("/api/rating", get(handlers::rating))
        .route("/api/health", get(handlers::health))
        .route("/docs", get(serve_swagger_ui))
        .route("/api-docs/openapi.json", get(serve_openapi_spec))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
}
