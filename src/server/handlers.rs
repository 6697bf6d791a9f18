//! Request handlers for the client routes.

use crate::error::ServiceError;
use crate::server::AppState;
use crate::services::ClientSearchService;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

/// Query parameters for `/clients/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Required search keyword
    pub keyword: Option<String>,

    /// Field to search; defaults to `full_name` in the core
    pub field: Option<String>,

    /// Alternate record source for this request's service instance
    pub path: Option<String>,
}

/// Query parameters for `/clients/duplicates`.
#[derive(Debug, Deserialize)]
pub struct DuplicatesParams {
    /// Field to group; defaults to `email` in the core
    pub field: Option<String>,

    /// Alternate record source for this request's service instance
    pub path: Option<String>,
}

/// Errors leaving the controller, mapped to status codes.
#[derive(Debug)]
pub enum ApiError {
    /// Core failure (load or engine)
    Service(ServiceError),

    /// Handler-level failure (e.g. a panicked blocking task)
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Service(ServiceError::Load(err)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Service(ServiceError::Engine(err)) => {
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!("Request failed: {}", message);
        (status, Json(json!({ "error": { "message": message } }))).into_response()
    }
}

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /clients/search?keyword=&field=&path=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let keyword = match params.keyword {
        Some(keyword) if !keyword.trim().is_empty() => keyword,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "message": "Missing keyword" } })),
            )
                .into_response();
        }
    };

    let field = params.field;
    let result = with_service(state, params.path, move |service| {
        service
            .search(&Value::String(keyword), field.as_deref())
            .map_err(ServiceError::from)
    })
    .await;

    match result {
        Ok(results) => Json(json!({ "results": results })).into_response(),
        Err(err) => err.into_response(),
    }
}

/// `GET /clients/duplicates?field=&path=`
pub async fn duplicates(
    State(state): State<AppState>,
    Query(params): Query<DuplicatesParams>,
) -> Response {
    let field = params.field;
    let result = with_service(state, params.path, move |service| {
        service
            .duplicates(field.as_deref())
            .map_err(ServiceError::from)
    })
    .await;

    match result {
        Ok(groups) => Json(json!({ "duplicates": groups })).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Construct a service for this request and run an operation against it.
///
/// Construction reindexes against `path` (or the configured default source),
/// so every request observes a freshly rebuilt index. The synchronous core
/// runs on the blocking thread pool.
async fn with_service<T, F>(
    state: AppState,
    path: Option<String>,
    operation: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ClientSearchService) -> Result<T, ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let source = path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(Path::new);
        let service = ClientSearchService::new(state.engine.clone(), &state.config, source)?;
        operation(&service)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
    .map_err(ApiError::from)
}
