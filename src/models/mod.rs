use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod youtube;

/// Which taxonomy category/term surfaced a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    pub category: String,
    pub term: String,
}

/// A recommended video returned to the client.
///
/// Immutable once constructed; lives for a single response cycle. Category,
/// topic and statistics fields are filled in by the enrichment pass and stay
/// empty when that call fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub channel_id: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// ISO-8601 period string, e.g. "PT3M33S"
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    /// Readable video category name, e.g. "Music"
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<Discovery>,
}

impl Video {
    /// Merges enrichment details into this video. Existing snippet-level
    /// fields are only overwritten when the details carry a value.
    pub fn apply_details(&mut self, details: &VideoDetails) {
        if details.category.is_some() {
            self.category = details.category.clone();
        }
        if !details.topics.is_empty() {
            self.topics = details.topics.clone();
        }
        if !details.tags.is_empty() {
            self.tags = details.tags.clone();
        }
        if details.duration.is_some() {
            self.duration = details.duration.clone();
        }
        if details.view_count.is_some() {
            self.view_count = details.view_count;
        }
        if details.like_count.is_some() {
            self.like_count = details.like_count;
        }
        if details.published_at.is_some() {
            self.published_at = details.published_at;
        }
    }
}

/// Batch-fetched metadata for one video id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoDetails {
    pub id: String,
    pub category: Option<String>,
    pub topics: Vec<String>,
    pub tags: Vec<String>,
    pub duration: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A channel the user is subscribed to. Fetched per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub channel_id: String,
    pub channel_title: String,
}

/// (term, category) pair from the static discovery taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryTerm {
    pub term: &'static str,
    pub category: &'static str,
}

/// Final pipeline output: deduplicated, filtered, shuffled recommendations
/// plus diagnostics about how they were produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub videos: Vec<Video>,
    /// Which tier produced the result: "discovery", "trending" or "sample"
    pub source: String,
    /// Comma-joined list of the search terms actually issued
    pub search_term: String,
    /// Categories sampled from the taxonomy for this request
    pub categories: Vec<String>,
}
