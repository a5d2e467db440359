//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{broadcasts, health, threads};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(broadcast_routes())
        .merge(thread_routes())
}

/// Broadcast routes
fn broadcast_routes() -> Router<AppState> {
    Router::new()
        .route("/broadcasts", post(broadcasts::create_broadcast))
        .route("/broadcasts", get(broadcasts::list_broadcasts))
        .route("/broadcasts/:broadcast_id", get(broadcasts::get_broadcast))
        .route("/broadcasts/:broadcast_id/cancel", post(broadcasts::cancel_broadcast))
        .route("/broadcasts/:broadcast_id/send", post(broadcasts::send_broadcast))
        .route("/broadcasts/:broadcast_id/recipients", get(broadcasts::list_recipients))
        .route("/broadcasts/:broadcast_id/confirm", post(broadcasts::confirm_broadcast))
}

/// Thread routes
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/threads/:peer_id/messages", get(threads::get_thread))
        .route("/threads/:peer_id/messages", post(threads::create_thread_message))
        .route("/threads/:peer_id/read", post(threads::mark_thread_read))
}
