use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::Subscription,
    routes::{AppState, RequestContext},
};

/// Data export: subscriptions and the history count only. Actual watch
/// history contents are withheld for privacy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub subscriptions: Vec<Subscription>,
    pub watch_history_count: usize,
    pub last_history_upload: Option<DateTime<Utc>>,
}

/// Handler for the user-data export endpoint
pub async fn export(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<ExportResponse>> {
    let subscriptions = state.provider.list_subscriptions(&ctx.token).await?;
    let record = state.history.get(&ctx.user_id).await?;

    Ok(Json(ExportResponse {
        subscriptions,
        watch_history_count: record
            .as_ref()
            .map(|r| r.video_ids.len())
            .unwrap_or_default(),
        last_history_upload: record.map(|r| r.last_upload),
    }))
}
