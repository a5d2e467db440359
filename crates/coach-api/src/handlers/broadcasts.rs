//! Broadcast handlers
//!
//! Coach-facing broadcast endpoints plus the client confirmation endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use coach_core::entities::BroadcastStatus;
use coach_service::{
    BroadcastResponse, BroadcastService, CreateBroadcastRequest, RecipientResponse,
};
use serde::Deserialize;

use crate::extractors::{AuthClient, AuthCoach, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Default page size for broadcast listings
const DEFAULT_LIST_LIMIT: i64 = 50;
/// Maximum page size for broadcast listings
const MAX_LIST_LIMIT: i64 = 100;

/// Query parameters for listing broadcasts
#[derive(Debug, Deserialize)]
pub struct ListBroadcastsParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Schedule a broadcast
///
/// POST /broadcasts
pub async fn create_broadcast(
    State(state): State<AppState>,
    AuthCoach(auth): AuthCoach,
    ValidatedJson(request): ValidatedJson<CreateBroadcastRequest>,
) -> ApiResult<Created<Json<BroadcastResponse>>> {
    let service = BroadcastService::new(state.service_context());
    let response = service.create_broadcast(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List the coach's broadcasts
///
/// GET /broadcasts
pub async fn list_broadcasts(
    State(state): State<AppState>,
    AuthCoach(auth): AuthCoach,
    Query(params): Query<ListBroadcastsParams>,
) -> ApiResult<Json<Vec<BroadcastResponse>>> {
    let status = params
        .status
        .map(|s| {
            s.parse::<BroadcastStatus>()
                .map_err(|_| ApiError::invalid_query("Invalid status filter"))
        })
        .transpose()?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    let service = BroadcastService::new(state.service_context());
    let broadcasts = service.list_broadcasts(auth.user_id, status, limit).await?;
    Ok(Json(broadcasts))
}

/// Get broadcast by ID
///
/// GET /broadcasts/{broadcast_id}
pub async fn get_broadcast(
    State(state): State<AppState>,
    AuthCoach(auth): AuthCoach,
    Path(broadcast_id): Path<String>,
) -> ApiResult<Json<BroadcastResponse>> {
    let broadcast_id = broadcast_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid broadcast_id format"))?;

    let service = BroadcastService::new(state.service_context());
    let response = service.get_broadcast(broadcast_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Cancel a scheduled broadcast
///
/// POST /broadcasts/{broadcast_id}/cancel
pub async fn cancel_broadcast(
    State(state): State<AppState>,
    AuthCoach(auth): AuthCoach,
    Path(broadcast_id): Path<String>,
) -> ApiResult<Json<BroadcastResponse>> {
    let broadcast_id = broadcast_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid broadcast_id format"))?;

    let service = BroadcastService::new(state.service_context());
    let response = service.cancel_broadcast(broadcast_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Send a scheduled broadcast immediately
///
/// POST /broadcasts/{broadcast_id}/send
pub async fn send_broadcast(
    State(state): State<AppState>,
    AuthCoach(auth): AuthCoach,
    Path(broadcast_id): Path<String>,
) -> ApiResult<Json<BroadcastResponse>> {
    let broadcast_id = broadcast_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid broadcast_id format"))?;

    let service = BroadcastService::new(state.service_context());
    let response = service.send_now(broadcast_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Delivery report for a broadcast
///
/// GET /broadcasts/{broadcast_id}/recipients
pub async fn list_recipients(
    State(state): State<AppState>,
    AuthCoach(auth): AuthCoach,
    Path(broadcast_id): Path<String>,
) -> ApiResult<Json<Vec<RecipientResponse>>> {
    let broadcast_id = broadcast_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid broadcast_id format"))?;

    let service = BroadcastService::new(state.service_context());
    let recipients = service.list_recipients(broadcast_id, auth.user_id).await?;
    Ok(Json(recipients))
}

/// Confirm receipt of a broadcast
///
/// POST /broadcasts/{broadcast_id}/confirm
pub async fn confirm_broadcast(
    State(state): State<AppState>,
    AuthClient(auth): AuthClient,
    Path(broadcast_id): Path<String>,
) -> ApiResult<NoContent> {
    let broadcast_id = broadcast_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid broadcast_id format"))?;

    let service = BroadcastService::new(state.service_context());
    service.confirm(broadcast_id, auth.user_id).await?;
    Ok(NoContent)
}
