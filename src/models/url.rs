use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VideoUrl {
    pub id: i64,
    pub url: String,
    pub created_at: i64,
}

/// Body of POST /api/save-url. The `url` field stays a raw JSON value so
/// the validator can tell "missing or not text" apart from "malformed".
#[derive(Debug, Deserialize)]
pub struct SaveUrlRequest {
    #[serde(default)]
    pub url: Option<serde_json::Value>,
}
