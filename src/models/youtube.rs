//! Wire types for the YouTube Data API v3 responses we consume, plus the
//! conversions into our domain models.
//!
//! All shapes are deserialization-only and deliberately lenient: the API
//! omits fields freely, and a single malformed item should never sink a
//! whole response.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Subscription, Video, VideoDetails};

// ============================================================================
// search.list
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl SearchItem {
    /// Converts a search result into a snippet-level [`Video`].
    ///
    /// Returns `None` for items missing the id, channel or thumbnail the
    /// client needs to render a card.
    pub fn into_video(self) -> Option<Video> {
        let id = self.id.video_id?;
        let snippet = self.snippet?;
        let thumbnail_url = snippet.thumbnails.best_url()?;
        let channel_id = snippet.channel_id?;
        let channel_title = snippet.channel_title?;

        Some(Video {
            id,
            title: snippet.title.unwrap_or_else(|| "No Title".to_string()),
            description: snippet.description,
            channel_id,
            channel_title,
            thumbnail_url,
            published_at: snippet.published_at,
            duration: None,
            view_count: None,
            like_count: None,
            category: None,
            topics: vec![],
            tags: vec![],
            discovery: None,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub standard: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub default: Option<Thumbnail>,
}

impl Thumbnails {
    /// Prefer higher-resolution thumbnails when available
    pub fn best_url(&self) -> Option<String> {
        self.standard
            .as_ref()
            .or(self.high.as_ref())
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

// ============================================================================
// videos.list (trending chart and details batch)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub content_details: Option<ContentDetails>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
    #[serde(default)]
    pub topic_details: Option<TopicDetails>,
}

impl VideoItem {
    /// Converts a full video item (e.g. from the trending chart) into a [`Video`].
    pub fn into_video(self) -> Option<Video> {
        let thumbnail_url = self.snippet.thumbnails.best_url()?;
        let channel_id = self.snippet.channel_id?;
        let channel_title = self.snippet.channel_title?;
        let stats = self.statistics.unwrap_or_default();

        Some(Video {
            id: self.id,
            title: self
                .snippet
                .title
                .unwrap_or_else(|| "No Title".to_string()),
            description: self.snippet.description,
            channel_id,
            channel_title,
            thumbnail_url,
            published_at: self.snippet.published_at,
            duration: self.content_details.and_then(|d| d.duration),
            view_count: parse_count(stats.view_count.as_deref()),
            like_count: parse_count(stats.like_count.as_deref()),
            category: self
                .snippet
                .category_id
                .as_deref()
                .and_then(category_name)
                .map(str::to_string),
            topics: self
                .topic_details
                .map(|t| t.topic_names())
                .unwrap_or_default(),
            tags: self.snippet.tags.unwrap_or_default(),
            discovery: None,
        })
    }

    /// Extracts the enrichment metadata from a details batch item.
    pub fn into_details(self) -> VideoDetails {
        let stats = self.statistics.unwrap_or_default();
        VideoDetails {
            id: self.id,
            category: self
                .snippet
                .category_id
                .as_deref()
                .and_then(category_name)
                .map(str::to_string),
            topics: self
                .topic_details
                .map(|t| t.topic_names())
                .unwrap_or_default(),
            tags: self.snippet.tags.unwrap_or_default(),
            duration: self.content_details.and_then(|d| d.duration),
            view_count: parse_count(stats.view_count.as_deref()),
            like_count: parse_count(stats.like_count.as_deref()),
            published_at: self.snippet.published_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: Option<String>,
}

/// Counters arrive as decimal strings on the wire
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(default)]
    pub view_count: Option<String>,
    #[serde(default)]
    pub like_count: Option<String>,
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.parse().ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDetails {
    #[serde(default)]
    pub topic_categories: Vec<String>,
}

impl TopicDetails {
    /// Maps topic category URLs to readable names, falling back to the last
    /// URL segment with underscores spaced out.
    pub fn topic_names(&self) -> Vec<String> {
        self.topic_categories
            .iter()
            .map(|url| {
                let segment = url.rsplit('/').next().unwrap_or(url);
                topic_name(&format!("/m/{}", segment))
                    .map(str::to_string)
                    .unwrap_or_else(|| segment.replace('_', " "))
            })
            .collect()
    }
}

// ============================================================================
// subscriptions.list
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionListResponse {
    #[serde(default)]
    pub items: Vec<SubscriptionItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub snippet: Option<SubscriptionSnippet>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

impl SubscriptionItem {
    /// Returns `None` for items missing the channel id or title
    pub fn into_subscription(self) -> Option<Subscription> {
        let snippet = self.snippet?;
        let channel_id = snippet.resource_id?.channel_id?;
        let channel_title = snippet.title?;
        Some(Subscription {
            channel_id,
            channel_title,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

// ============================================================================
// activities.list (limited watch-history fallback)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListResponse {
    #[serde(default)]
    pub items: Vec<ActivityItem>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(default)]
    pub content_details: Option<ActivityContentDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityContentDetails {
    #[serde(default)]
    pub upload: Option<UploadDetails>,
    #[serde(default)]
    pub playlist_item: Option<ResourceRef>,
    #[serde(default)]
    pub like: Option<ResourceRef>,
    #[serde(default)]
    pub recommendation: Option<ResourceRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDetails {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

impl ActivityItem {
    /// Pulls a video id out of whichever activity shape this item carries
    pub fn video_id(&self) -> Option<String> {
        let details = self.content_details.as_ref()?;
        if let Some(id) = details.upload.as_ref().and_then(|u| u.video_id.clone()) {
            return Some(id);
        }
        for resource in [
            details.playlist_item.as_ref(),
            details.like.as_ref(),
            details.recommendation.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            if let Some(id) = resource
                .resource_id
                .as_ref()
                .and_then(|r| r.video_id.clone())
            {
                return Some(id);
            }
        }
        None
    }
}

// ============================================================================
// Category and topic mappings
// ============================================================================

/// Maps a YouTube category id to a readable name
pub fn category_name(id: &str) -> Option<&'static str> {
    let name = match id {
        "1" => "Film & Animation",
        "2" => "Autos & Vehicles",
        "10" => "Music",
        "15" => "Pets & Animals",
        "17" => "Sports",
        "18" => "Short Movies",
        "19" => "Travel & Events",
        "20" => "Gaming",
        "21" => "Videoblogging",
        "22" => "People & Blogs",
        "23" => "Comedy",
        "24" => "Entertainment",
        "25" => "News & Politics",
        "26" => "Howto & Style",
        "27" => "Education",
        "28" => "Science & Technology",
        "29" => "Nonprofits & Activism",
        "30" => "Movies",
        "31" => "Anime/Animation",
        "32" => "Action/Adventure",
        "33" => "Classics",
        "34" => "Comedy",
        "35" => "Documentary",
        "36" => "Drama",
        "37" => "Family",
        "38" => "Foreign",
        "39" => "Horror",
        "40" => "Sci-Fi/Fantasy",
        "41" => "Thriller",
        "42" => "Shorts",
        "43" => "Shows",
        "44" => "Trailers",
        _ => return None,
    };
    Some(name)
}

/// Freebase topic mid -> readable topic name
pub fn topic_name(mid: &str) -> Option<&'static str> {
    const TOPICS: &[(&str, &str)] = &[
        ("/m/04rlf", "Music"),
        ("/m/05fw6t", "Children's music"),
        ("/m/02mscn", "Christian music"),
        ("/m/0ggq0m", "Classical music"),
        ("/m/01lyv", "Country"),
        ("/m/02lkt", "Electronic music"),
        ("/m/0glt670", "Hip hop music"),
        ("/m/05rwpb", "Independent music"),
        ("/m/03_d0", "Jazz"),
        ("/m/028sqc", "Music of Asia"),
        ("/m/0g293", "Music of Latin America"),
        ("/m/064t9", "Pop music"),
        ("/m/06cqb", "Reggae"),
        ("/m/06j6l", "Rhythm and blues"),
        ("/m/06by7", "Rock music"),
        ("/m/0gywn", "Soul music"),
        ("/m/07s6nbt", "Action game"),
        ("/m/025zzc", "Action-adventure game"),
        ("/m/02ntfj", "Casual game"),
        ("/m/03hf_rm", "Music video game"),
        ("/m/04q1x3q", "Puzzle video game"),
        ("/m/01sjng", "Racing video game"),
        ("/m/0403l3g", "Role-playing video game"),
        ("/m/021bp2", "Simulation video game"),
        ("/m/022dc6", "Sports game"),
        ("/m/03hf5t", "Strategy video game"),
        ("/m/06ntj", "Sports"),
        ("/m/0jm_", "American football"),
        ("/m/018jz", "Baseball"),
        ("/m/018w8", "Basketball"),
        ("/m/01cgz", "Boxing"),
        ("/m/09xp_", "Cricket"),
        ("/m/02vx4", "Football"),
        ("/m/037hz", "Golf"),
        ("/m/03tmr", "Ice hockey"),
        ("/m/01h7lh", "Mixed martial arts"),
        ("/m/05hs7w", "Motorsport"),
        ("/m/066wd", "Professional wrestling"),
        ("/m/07bs0", "Tennis"),
        ("/m/07_53", "Volleyball"),
        ("/m/02jjt", "Entertainment"),
        ("/m/09kqc", "Humor"),
        ("/m/02vxn", "Movies"),
        ("/m/05qjc", "Performing arts"),
        ("/m/0f2f9", "TV shows"),
        ("/m/019_rr", "Lifestyle"),
        ("/m/032tl", "Fashion"),
        ("/m/027x7n", "Fitness"),
        ("/m/02wbm", "Food"),
        ("/m/03glg", "Hobby"),
        ("/m/068hy", "Pets"),
        ("/m/041xxh", "Physical attractiveness"),
        ("/m/07c1v", "Technology"),
        ("/m/07bxq", "Tourism"),
        ("/m/07k1x", "Vehicles"),
        ("/m/01k8wb", "Knowledge"),
        ("/m/098wr", "Society"),
    ];

    TOPICS
        .iter()
        .find(|(key, _)| *key == mid)
        .map(|(_, name)| *name)
}
