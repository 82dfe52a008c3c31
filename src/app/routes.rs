use crate::core::dataset::load_dataset;
use crate::core::resolver::BlobClientResolver;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

/// Remediation text for the operator-facing configuration failure. This is a
/// setup fault, not a transient error, so the body says what to change.
const STORAGE_UNCONFIGURED: &str = "Storage is not configured. Please set \
    AZURE_STORAGE_CONNECTION_STRING or enable managed identity \
    (USE_MANAGED_IDENTITY=true).";

const GENERIC_GREETING: &str = "This HTTP triggered function executed successfully. \
    Pass a name in the query string or in the request body for a personalized response.";

#[derive(Clone)]
pub struct AppState {
    resolver: Arc<BlobClientResolver>,
}

impl AppState {
    pub fn new(resolver: BlobClientResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/GetDataset", any(get_dataset))
        .route("/api/FetchDataset", any(fetch_dataset))
        .with_state(state)
}

/// Fixed CORS header set attached to every response, error paths included,
/// so browser clients can always read the body.
fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type,Authorization"),
        ),
    ]
}

fn preflight_response() -> Response {
    (StatusCode::NO_CONTENT, cors_headers()).into_response()
}

#[derive(Debug, Deserialize)]
struct GreetingParams {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GreetingBody {
    name: Option<String>,
}

/// Demo echo route: greets by `name` from the query string or a JSON body.
async fn get_dataset(
    method: Method,
    params: Result<Query<GreetingParams>, QueryRejection>,
    body: Bytes,
) -> Response {
    tracing::info!("GetDataset processed a request");

    if method == Method::OPTIONS {
        return preflight_response();
    }

    let name = params
        .ok()
        .and_then(|Query(p)| p.name)
        .filter(|n| !n.is_empty())
        .or_else(|| {
            serde_json::from_slice::<GreetingBody>(&body)
                .ok()
                .and_then(|b| b.name)
                .filter(|n| !n.is_empty())
        });

    let text = match name {
        Some(name) => format!(
            "Hello, {}. This HTTP triggered function executed successfully.",
            name
        ),
        None => GENERIC_GREETING.to_string(),
    };

    (StatusCode::OK, cors_headers(), text).into_response()
}

/// Dataset route: download the CSV blob, convert it to a JSON array of row
/// objects, and return it with CORS headers.
async fn fetch_dataset(State(state): State<AppState>, method: Method) -> Response {
    tracing::info!("FetchDataset processed a request");

    if method == Method::OPTIONS {
        return preflight_response();
    }

    let storage = match state.resolver.resolve().await {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!("Blob storage client not available: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers(),
                STORAGE_UNCONFIGURED,
            )
                .into_response();
        }
    };

    match load_dataset(storage.as_ref()).await {
        Ok(json_body) => (
            StatusCode::OK,
            cors_headers(),
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            json_body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error fetching dataset blob: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers(),
                format!("Error: {}", e),
            )
                .into_response()
        }
    }
}
