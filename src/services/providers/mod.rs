//! Video platform provider abstraction
//!
//! The discovery pipeline only talks to this trait, so tests can drive it
//! with stub providers and another platform could be slotted in without
//! touching the pipeline.

use crate::{
    error::AppResult,
    models::{Subscription, Video, VideoDetails},
};

pub mod youtube;

/// Trait for external video platform providers
///
/// Calls that act on behalf of the signed-in user take their OAuth access
/// token; the trending chart and the details batch run on the server's own
/// API key. Implementations must map upstream 401/403 responses to
/// [`crate::error::AppError::Unauthorized`] so the pipeline can distinguish
/// credential failures from ordinary outages.
#[async_trait::async_trait]
pub trait VideoProvider: Send + Sync {
    /// Keyword search returning up to `max_results` snippet-level videos
    async fn search_videos(
        &self,
        token: &str,
        query: &str,
        max_results: u32,
    ) -> AppResult<Vec<Video>>;

    /// Most-popular chart listing, used as a backfill tier
    async fn trending_videos(&self, max_results: u32) -> AppResult<Vec<Video>>;

    /// One batch call fetching category, topics, tags and statistics for the
    /// given video ids
    async fn video_details(&self, ids: &[String]) -> AppResult<Vec<VideoDetails>>;

    /// The user's channel subscriptions, following pagination
    async fn list_subscriptions(&self, token: &str) -> AppResult<Vec<Subscription>>;

    /// Video ids from the user's recent activity feed. A rough stand-in for
    /// watch history when no Takeout export has been uploaded.
    async fn recent_activity_ids(&self, token: &str) -> AppResult<Vec<String>>;

    /// Provider name for logging and diagnostics
    fn name(&self) -> &'static str;
}
