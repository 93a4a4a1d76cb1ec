//! YouTube Data API v3 provider.
//!
//! Search, trending chart, details batches, subscriptions and the activity
//! feed. User-scoped calls carry the caller's bearer token; trending and
//! details use the server API key.

use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};

use crate::{
    error::{AppError, AppResult},
    models::{
        youtube::{
            ActivityListResponse, SearchListResponse, SubscriptionListResponse, VideoListResponse,
        },
        Subscription, Video, VideoDetails,
    },
    services::providers::VideoProvider,
};

const PAGE_SIZE: u32 = 50;
/// Subscription pagination cap, to stay inside API quota
const MAX_SUBSCRIPTION_PAGES: u32 = 10;
/// Activity-feed pagination cap (4 x 50 = up to 200 recent items)
const MAX_ACTIVITY_PAGES: u32 = 4;

#[derive(Clone)]
pub struct YouTubeProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    region_code: String,
}

impl YouTubeProvider {
    pub fn new(api_key: String, api_url: String, region_code: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            region_code,
        }
    }

    /// Sends a request and surfaces non-success statuses as errors,
    /// distinguishing credential failures from other upstream problems.
    async fn send(&self, request: RequestBuilder, what: &str) -> AppResult<reqwest::Response> {
        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, call = what, body = %body, "Credential rejected by upstream");
            return Err(AppError::Unauthorized(
                "YouTube rejected the access credential".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, call = what, body = %body, "YouTube API request failed");
            return Err(AppError::ExternalApi(format!(
                "YouTube {} returned status {}: {}",
                what, status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl VideoProvider for YouTubeProvider {
    async fn search_videos(
        &self,
        token: &str,
        query: &str,
        max_results: u32,
    ) -> AppResult<Vec<Video>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search", self.api_url);
        let max = max_results.to_string();
        let request = self.http_client.get(&url).bearer_auth(token).query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("videoEmbeddable", "true"),
            ("maxResults", max.as_str()),
        ]);

        let response: SearchListResponse = self.send(request, "search").await?.json().await?;

        let videos: Vec<Video> = response
            .items
            .into_iter()
            .filter_map(|item| item.into_video())
            .collect();

        tracing::info!(
            query = %query,
            results = videos.len(),
            provider = "youtube",
            "Video search completed"
        );

        Ok(videos)
    }

    async fn trending_videos(&self, max_results: u32) -> AppResult<Vec<Video>> {
        let url = format!("{}/videos", self.api_url);
        let max = max_results.to_string();
        let request = self.http_client.get(&url).query(&[
            ("part", "snippet,contentDetails,statistics"),
            ("chart", "mostPopular"),
            ("regionCode", self.region_code.as_str()),
            ("maxResults", max.as_str()),
            ("key", self.api_key.as_str()),
        ]);

        let response: VideoListResponse = self.send(request, "trending").await?.json().await?;

        let videos: Vec<Video> = response
            .items
            .into_iter()
            .filter_map(|item| item.into_video())
            .collect();

        tracing::info!(results = videos.len(), provider = "youtube", "Trending chart fetched");

        Ok(videos)
    }

    async fn video_details(&self, ids: &[String]) -> AppResult<Vec<VideoDetails>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let url = format!("{}/videos", self.api_url);
        let id_list = ids.join(",");
        let max = PAGE_SIZE.to_string();
        let request = self.http_client.get(&url).query(&[
            ("part", "snippet,contentDetails,statistics,topicDetails"),
            ("id", id_list.as_str()),
            ("maxResults", max.as_str()),
            ("key", self.api_key.as_str()),
        ]);

        let response: VideoListResponse = self.send(request, "videos").await?.json().await?;

        tracing::debug!(
            requested = ids.len(),
            returned = response.items.len(),
            "Video details batch fetched"
        );

        Ok(response
            .items
            .into_iter()
            .map(|item| item.into_details())
            .collect())
    }

    async fn list_subscriptions(&self, token: &str) -> AppResult<Vec<Subscription>> {
        let url = format!("{}/subscriptions", self.api_url);
        let max = PAGE_SIZE.to_string();
        let mut subscriptions = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0;

        loop {
            page_count += 1;
            let mut request = self.http_client.get(&url).bearer_auth(token).query(&[
                ("part", "snippet"),
                ("mine", "true"),
                ("maxResults", max.as_str()),
            ]);
            if let Some(ref page) = page_token {
                request = request.query(&[("pageToken", page.as_str())]);
            }

            let response: SubscriptionListResponse =
                self.send(request, "subscriptions").await?.json().await?;

            subscriptions.extend(
                response
                    .items
                    .into_iter()
                    .filter_map(|item| item.into_subscription()),
            );

            page_token = response.next_page_token;
            if page_token.is_none() || page_count >= MAX_SUBSCRIPTION_PAGES {
                break;
            }
        }

        tracing::info!(
            count = subscriptions.len(),
            pages = page_count,
            "Fetched user subscriptions"
        );

        Ok(subscriptions)
    }

    async fn recent_activity_ids(&self, token: &str) -> AppResult<Vec<String>> {
        let url = format!("{}/activities", self.api_url);
        let max = PAGE_SIZE.to_string();
        let mut video_ids = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0;

        loop {
            page_count += 1;
            let mut request = self.http_client.get(&url).bearer_auth(token).query(&[
                ("part", "snippet,contentDetails"),
                ("mine", "true"),
                ("maxResults", max.as_str()),
            ]);
            if let Some(ref page) = page_token {
                request = request.query(&[("pageToken", page.as_str())]);
            }

            let response: ActivityListResponse =
                self.send(request, "activities").await?.json().await?;

            video_ids.extend(response.items.iter().filter_map(|item| item.video_id()));

            page_token = response.next_page_token;
            if page_token.is_none() || page_count >= MAX_ACTIVITY_PAGES {
                break;
            }
        }

        tracing::info!(
            count = video_ids.len(),
            pages = page_count,
            "Fetched activity feed as watch-history fallback"
        );

        Ok(video_ids)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}
