//! Route handlers
//!
//! Each handler parses the category, file name, or payload out of the request,
//! calls the category store, and shapes the result into a response.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::http::responses::{
    ActionResponse, ApiError, Health, MarkersResponse, content_type_for,
};
use crate::http::state::AppState;
use crate::storage::Category;

/// Multipart field carrying the uploaded file
const UPLOAD_FIELD: &str = "file";

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// GET /api/{category}
pub async fn list_files(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let category: Category = category.parse()?;
    let files = state.store.list(category).await?;
    Ok(Json(files))
}

/// GET /markers/all
pub async fn list_markers(State(state): State<AppState>) -> Result<Json<MarkersResponse>, ApiError> {
    let markers = state.store.list(Category::Markers).await?;
    Ok(Json(MarkersResponse { markers }))
}

/// POST /api/{category} with a multipart `file` field
pub async fn upload_file(
    State(state): State<AppState>,
    Path(category): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ActionResponse>, ApiError> {
    let category: Category = category.parse()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => break,
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;

        state.store.save(category, &filename, &content).await?;
        return Ok(Json(ActionResponse::success()));
    }

    warn!("Upload to {} without a file", category);
    Err(ApiError::bad_request("No file uploaded"))
}

/// DELETE /api/{category}/{name}
pub async fn delete_file(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<Json<ActionResponse>, ApiError> {
    let category: Category = category.parse()?;
    let deleted = state.store.delete(category, &filename).await?;
    Ok(Json(ActionResponse::with_result(deleted)))
}

/// GET /data-api/{category}/{name}
pub async fn serve_file(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let category: Category = category.parse()?;

    let Some(content) = state.store.read(category, &filename).await? else {
        return Ok((StatusCode::NOT_FOUND, "Not found").into_response());
    };

    let headers = [
        (header::CONTENT_TYPE, content_type_for(&filename)),
        (
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.cache_max_age_secs),
        ),
    ];
    Ok((headers, content).into_response())
}

#[derive(Debug, Deserialize)]
pub struct SaveConfigRequest {
    filename: Option<String>,
    content: Option<Value>,
}

/// Config content that carries nothing worth saving
fn is_blank(content: &Value) -> bool {
    match content {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// POST /configs with `{"filename": ..., "content": ...}`
pub async fn save_config(
    State(state): State<AppState>,
    Json(request): Json<SaveConfigRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let (filename, content) = match (request.filename, request.content) {
        (Some(filename), Some(content)) if !filename.is_empty() && !is_blank(&content) => {
            (filename, content)
        }
        _ => return Err(ApiError::bad_request("Missing filename or content")),
    };

    let body = serde_json::to_vec_pretty(&content).map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode config: {e}"),
        )
    })?;

    let path = state.store.save(Category::Configs, &filename, &body).await?;
    info!("Saved config to: {}", path.display());
    Ok(Json(ActionResponse::with_message("File saved successfully")))
}
