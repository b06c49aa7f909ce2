use crate::models::VideoUrl;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Initialize the storage (create tables, indexes)
    async fn init(&self) -> Result<()>;

    /// Insert one URL; storage assigns id and created_at
    async fn save(&self, url: &str) -> Result<VideoUrl>;

    /// All saved URLs, newest first
    async fn list(&self) -> Result<Vec<VideoUrl>>;
}
