use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    routes::{AppState, RequestContext},
    services::takeout,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub processed_videos: usize,
    pub last_update: Option<DateTime<Utc>>,
    pub message: String,
}

/// Handler for the watch-history upload endpoint.
///
/// Accepts a Takeout watch-history export as a JSON body. Unparsable JSON is
/// a descriptive 400; a well-formed payload without watch events succeeds
/// with zero processed videos.
pub async fn upload(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ctx: RequestContext,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<UploadResponse>> {
    let Json(payload) = payload.map_err(|e| {
        AppError::InvalidInput(format!(
            "Invalid JSON format. Please ensure you uploaded the correct watch-history export: {}",
            e
        ))
    })?;

    let video_ids = takeout::extract_watched_ids(&payload);
    let processed = video_ids.len();

    tracing::info!(
        request_id = %request_id,
        user_id = %ctx.user_id,
        processed,
        "Processed watch-history upload"
    );

    if processed == 0 {
        let last_update = state
            .history
            .get(&ctx.user_id)
            .await?
            .map(|record| record.last_upload);
        return Ok(Json(UploadResponse {
            success: true,
            processed_videos: 0,
            last_update,
            message: "Processed history file, but no watch events found.".to_string(),
        }));
    }

    let record = state.history.merge(&ctx.user_id, video_ids).await?;

    Ok(Json(UploadResponse {
        success: true,
        processed_videos: processed,
        last_update: Some(record.last_upload),
        message: "Watch history processed.".to_string(),
    }))
}
