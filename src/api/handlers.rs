use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::models::{SaveUrlRequest, VideoUrl};
use crate::storage::Storage;
use crate::validate;

pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct SaveUrlResponse {
    pub success: bool,
    pub message: String,
    pub data: VideoUrl,
}

#[derive(Serialize)]
pub struct UrlListResponse {
    pub data: Vec<VideoUrl>,
}

/// Save a submitted video URL
pub async fn save_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SaveUrlRequest>,
) -> Result<Json<SaveUrlResponse>, (StatusCode, Json<ErrorResponse>)> {
    let url = validate::video_url(payload.url.as_ref()).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    match state.storage.save(url).await {
        Ok(record) => Ok(Json(SaveUrlResponse {
            success: true,
            message: "Video URL saved to the database".to_string(),
            data: record,
        })),
        Err(e) => {
            error!("Storage error while saving URL: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to save URL: {}", e),
                }),
            ))
        }
    }
}

/// List all saved URLs, newest first
///
/// Responses carry `Cache-Control: no-store` so the listing always
/// reflects the latest storage state.
pub async fn get_urls(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match state.storage.list().await {
        Ok(urls) => Ok((
            [(header::CACHE_CONTROL, "no-store")],
            Json(UrlListResponse { data: urls }),
        )),
        Err(e) => {
            error!("Storage error while listing URLs: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list URLs: {}", e),
                }),
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
