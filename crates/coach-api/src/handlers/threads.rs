//! Thread handlers
//!
//! Endpoints for the 1:1 coach-client thread. Both roles use the same
//! routes; the caller's role decides which side of the pair they are.

use axum::{
    extract::{Path, State},
    Json,
};
use coach_core::Snowflake;
use coach_service::{
    CreateThreadMessageRequest, MarkReadResponse, ThreadMessageResponse, ThreadService,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Resolve the (coach, client) pair for a thread from the caller's role.
fn thread_pair(auth: &AuthUser, peer_id: Snowflake) -> (Snowflake, Snowflake) {
    if auth.role.is_coach() {
        (auth.user_id, peer_id)
    } else {
        (peer_id, auth.user_id)
    }
}

/// Get messages in a thread
///
/// GET /threads/{peer_id}/messages
pub async fn get_thread(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(peer_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ThreadMessageResponse>>> {
    let peer_id = peer_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid peer_id format"))?;
    let (coach_id, client_id) = thread_pair(&auth, peer_id);

    let service = ThreadService::new(state.service_context());
    let messages = service
        .get_thread(
            coach_id,
            client_id,
            pagination.after,
            i64::from(pagination.limit),
        )
        .await?;
    Ok(Json(messages))
}

/// Send a message in a thread
///
/// POST /threads/{peer_id}/messages
pub async fn create_thread_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(peer_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateThreadMessageRequest>,
) -> ApiResult<Created<Json<ThreadMessageResponse>>> {
    let peer_id = peer_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid peer_id format"))?;
    let (coach_id, client_id) = thread_pair(&auth, peer_id);

    let service = ThreadService::new(state.service_context());
    let response = service
        .send_message(coach_id, client_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// Mark the peer's messages in a thread as read
///
/// POST /threads/{peer_id}/read
pub async fn mark_thread_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(peer_id): Path<String>,
) -> ApiResult<Json<MarkReadResponse>> {
    let peer_id = peer_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid peer_id format"))?;
    let (coach_id, client_id) = thread_pair(&auth, peer_id);

    let service = ThreadService::new(state.service_context());
    let response = service.mark_read(coach_id, client_id, auth.user_id).await?;
    Ok(Json(response))
}
