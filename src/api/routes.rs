use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::FrontendConfig;
use crate::storage::Storage;

use super::handlers::{get_urls, health_check, save_url, AppState};
use super::static_files::serve_static;

pub fn create_router(storage: Arc<dyn Storage>, frontend: FrontendConfig) -> Router {
    let state = Arc::new(AppState { storage });

    let static_dir = frontend.static_dir;

    Router::new()
        .route("/api/save-url", post(save_url))
        .route("/api/get-urls", get(get_urls))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .fallback(move |uri: Uri| {
            let static_dir = static_dir.clone();
            async move { serve_static(uri, static_dir).await }
        })
}
