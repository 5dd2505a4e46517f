//! HTTP routes: `GET /ping` and `POST /inspect`.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use schemalens_core::{FetchConfig, InspectConfig, Inspector, NormalizedRecord, SchemaLensError, fetch_url};
use serde::{Deserialize, Serialize};

/// Largest request body accepted by `/inspect`.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// State shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub fetch: FetchConfig,
}

/// Body of `POST /inspect`. Either `html` or `url` must be present.
#[derive(Debug, Deserialize)]
pub struct InspectRequest {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub success: bool,
    pub ready: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct InspectResponse {
    pub success: bool,
    pub data: NormalizedRecord,
}

/// Error envelope: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ErrorResponse {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into(), status: StatusCode::BAD_REQUEST }
    }

    pub fn bad_gateway(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into(), status: StatusCode::BAD_GATEWAY }
    }
}

impl From<SchemaLensError> for ErrorResponse {
    fn from(err: SchemaLensError) -> Self {
        match err {
            SchemaLensError::InvalidUrl(_) => Self::bad_request(err.to_string()),
            _ => Self::bad_gateway(err.to_string()),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    let ready = Inspector::new().ping();
    Json(PingResponse { success: true, ready, message: "SchemaLens engine ready".to_string() })
}

/// POST /inspect
///
/// Inspects `html` when given, resolving links against `url` if present.
/// Without `html`, the page at `url` is fetched first.
pub async fn inspect(
    State(state): State<AppState>, body: Result<Json<InspectRequest>, JsonRejection>,
) -> Result<Json<InspectResponse>, ErrorResponse> {
    let Json(request) = body.map_err(|rejection| ErrorResponse::bad_request(rejection.body_text()))?;
    let started = Instant::now();

    let mut config = InspectConfig::builder();
    if let Some(types) = request.types {
        config = config.types(types);
    }
    let inspector = Inspector::with_config(config.build());

    let record = match (request.html, request.url) {
        (Some(html), Some(url)) => inspector.inspect_html_with_url(&html, &url)?,
        (Some(html), None) => inspector.inspect_html(&html),
        (None, Some(url)) => {
            let html = fetch_url(&url, &state.fetch).await?;
            inspector.inspect_html_with_url(&html, &url)?
        }
        (None, None) => return Err(ErrorResponse::bad_request("request must include `html` or `url`")),
    };

    tracing::info!(
        types = record.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "inspected page"
    );

    Ok(Json(InspectResponse { success: true, data: record }))
}

/// Routes without the outer middleware stack.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/inspect", post(inspect))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
