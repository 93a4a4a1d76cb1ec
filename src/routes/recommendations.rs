use axum::{extract::State, Extension, Json};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Recommendations,
    routes::{AppState, RequestContext},
    services::discovery,
};

/// Handler for the recommendations endpoint.
///
/// Subscription or activity-feed failures degrade to empty exclusion sets
/// rather than failing the request; only credential failures surface, so the
/// frontend can force a re-login.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ctx: RequestContext,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %ctx.user_id,
        "Processing recommendations request"
    );

    let subscriptions = match state.provider.list_subscriptions(&ctx.token).await {
        Ok(subs) => subs,
        Err(e) if e.is_auth() => return Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "Subscription fetch failed, continuing without");
            vec![]
        }
    };

    // Uploaded Takeout history when present, otherwise the limited
    // activity-feed approximation
    let watched_ids: Vec<String> = match state.history.get(&ctx.user_id).await? {
        Some(record) => {
            tracing::debug!(count = record.video_ids.len(), "Using uploaded watch history");
            record.video_ids.into_iter().collect()
        }
        None => match state.provider.recent_activity_ids(&ctx.token).await {
            Ok(ids) => {
                tracing::debug!(count = ids.len(), "Using activity feed as history fallback");
                ids
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Activity feed fetch failed, continuing without");
                vec![]
            }
        },
    };

    let mut rng = StdRng::from_entropy();
    let recommendations = discovery::recommend(
        state.provider.as_ref(),
        &mut rng,
        &ctx.token,
        &subscriptions,
        &watched_ids,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.videos.len(),
        source = %recommendations.source,
        "Recommendations generated"
    );

    Ok(Json(recommendations))
}
