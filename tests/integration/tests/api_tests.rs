//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_id, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_broadcasts_require_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/broadcasts").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_client_cannot_schedule_broadcasts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.client_token(test_id()).unwrap();

    let request = CreateBroadcastRequest::future_for_all();
    let response = server
        .post_auth("/api/v1/broadcasts", &token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Broadcast Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_broadcast() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let coach_id = test_id();
    let token = server.coach_token(coach_id).unwrap();

    let request = CreateBroadcastRequest::future_for_all();
    let response = server
        .post_auth("/api/v1/broadcasts", &token, &request)
        .await
        .unwrap();
    let created: BroadcastResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.coach_id, coach_id.to_string());
    assert_eq!(created.status, "scheduled");
    assert_eq!(created.title.as_deref(), Some("Holiday hours"));

    // Fetch it back
    let response = server
        .get_auth(&format!("/api/v1/broadcasts/{}", created.id), &token)
        .await
        .unwrap();
    let fetched: BroadcastResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, created.id);

    // It shows up in the listing
    let response = server.get_auth("/api/v1/broadcasts", &token).await.unwrap();
    let listed: Vec<BroadcastResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.iter().any(|b| b.id == created.id));
}

#[tokio::test]
async fn test_broadcast_hidden_from_other_coaches() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.coach_token(test_id()).unwrap();
    let other_token = server.coach_token(test_id()).unwrap();

    let request = CreateBroadcastRequest::future_for_all();
    let response = server
        .post_auth("/api/v1/broadcasts", &token, &request)
        .await
        .unwrap();
    let created: BroadcastResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/broadcasts/{}", created.id), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_invalid_broadcast_id_is_bad_request() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.coach_token(test_id()).unwrap();

    let response = server
        .get_auth("/api/v1/broadcasts/not-a-number", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_cancel_broadcast() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.coach_token(test_id()).unwrap();

    let request = CreateBroadcastRequest::future_for_all();
    let response = server
        .post_auth("/api/v1/broadcasts", &token, &request)
        .await
        .unwrap();
    let created: BroadcastResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Cancel
    let response = server
        .post_auth_empty(&format!("/api/v1/broadcasts/{}/cancel", created.id), &token)
        .await
        .unwrap();
    let canceled: BroadcastResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(canceled.status, "canceled");

    // A second cancel conflicts
    let response = server
        .post_auth_empty(&format!("/api/v1/broadcasts/{}/cancel", created.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_send_now_fans_out_to_recipients() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.coach_token(test_id()).unwrap();
    let clients = [test_id(), test_id()];

    let request = CreateBroadcastRequest::due_for_clients(&clients);
    let response = server
        .post_auth("/api/v1/broadcasts", &token, &request)
        .await
        .unwrap();
    let created: BroadcastResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Send immediately
    let response = server
        .post_auth_empty(&format!("/api/v1/broadcasts/{}/send", created.id), &token)
        .await
        .unwrap();
    let sent: BroadcastResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sent.status, "sent");

    // Delivery report covers both clients
    let response = server
        .get_auth(&format!("/api/v1/broadcasts/{}/recipients", created.id), &token)
        .await
        .unwrap();
    let recipients: Vec<RecipientResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(recipients.len(), 2);
    assert!(recipients.iter().all(|r| r.sent_at.is_some()));
    assert!(recipients.iter().all(|r| !r.confirmed));

    // Sending twice conflicts
    let response = server
        .post_auth_empty(&format!("/api/v1/broadcasts/{}/send", created.id), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Confirmation Tests
// ============================================================================

#[tokio::test]
async fn test_confirm_broadcast() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let coach_token = server.coach_token(test_id()).unwrap();
    let client_id = test_id();
    let client_token = server.client_token(client_id).unwrap();

    // Schedule and send to this client
    let request = CreateBroadcastRequest::due_for_clients(&[client_id]);
    let response = server
        .post_auth("/api/v1/broadcasts", &coach_token, &request)
        .await
        .unwrap();
    let created: BroadcastResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth_empty(&format!("/api/v1/broadcasts/{}/send", created.id), &coach_token)
        .await
        .unwrap();

    // Confirm, then confirm again; both are 204
    let path = format!("/api/v1/broadcasts/{}/confirm", created.id);
    let response = server.post_auth_empty(&path, &client_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.post_auth_empty(&path, &client_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The coach's report reflects the confirmation
    let response = server
        .get_auth(&format!("/api/v1/broadcasts/{}/recipients", created.id), &coach_token)
        .await
        .unwrap();
    let recipients: Vec<RecipientResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(recipients.len(), 1);
    assert!(recipients[0].confirmed);
    assert!(recipients[0].confirmed_at.is_some());
}

#[tokio::test]
async fn test_confirm_unknown_broadcast_is_not_found() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let client_token = server.client_token(test_id()).unwrap();

    let response = server
        .post_auth_empty("/api/v1/broadcasts/31337/confirm", &client_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Thread Tests
// ============================================================================

#[tokio::test]
async fn test_thread_messages_and_enrichment() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let coach_id = test_id();
    let client_id = test_id();
    let coach_token = server.coach_token(coach_id).unwrap();
    let client_token = server.client_token(client_id).unwrap();

    // Deliver a broadcast into the thread
    let request = CreateBroadcastRequest::due_for_clients(&[client_id]);
    let response = server
        .post_auth("/api/v1/broadcasts", &coach_token, &request)
        .await
        .unwrap();
    let broadcast: BroadcastResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    server
        .post_auth_empty(&format!("/api/v1/broadcasts/{}/send", broadcast.id), &coach_token)
        .await
        .unwrap();

    // Coach follows up with a direct message
    let message = CreateThreadMessageRequest::simple("Does the new time work for you?");
    let response = server
        .post_auth(&format!("/api/v1/threads/{}/messages", client_id), &coach_token, &message)
        .await
        .unwrap();
    let direct: ThreadMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(direct.sender_id, coach_id.to_string());
    assert!(direct.group_message_id.is_none());

    // The client sees both messages, oldest first, with the broadcast enriched
    let response = server
        .get_auth(&format!("/api/v1/threads/{}/messages", coach_id), &client_token)
        .await
        .unwrap();
    let thread: Vec<ThreadMessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread.len(), 2);

    let fanned_out = &thread[0];
    assert_eq!(fanned_out.group_message_id.as_deref(), Some(broadcast.id.as_str()));
    assert_eq!(fanned_out.group_message_title.as_deref(), Some("Schedule change"));
    assert_eq!(fanned_out.requires_confirmation, Some(true));
    assert!(fanned_out.confirmed_at.is_none());

    assert_eq!(thread[1].id, direct.id);
}

#[tokio::test]
async fn test_mark_thread_read() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let coach_id = test_id();
    let client_id = test_id();
    let coach_token = server.coach_token(coach_id).unwrap();
    let client_token = server.client_token(client_id).unwrap();

    // Coach sends two messages
    for body in ["First", "Second"] {
        let message = CreateThreadMessageRequest::simple(body);
        server
            .post_auth(&format!("/api/v1/threads/{}/messages", client_id), &coach_token, &message)
            .await
            .unwrap();
    }

    // Client marks the thread read
    let response = server
        .post_auth_empty(&format!("/api/v1/threads/{}/read", coach_id), &client_token)
        .await
        .unwrap();
    let marked: MarkReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.updated, 2);

    // Nothing left unread on a second pass
    let response = server
        .post_auth_empty(&format!("/api/v1/threads/{}/read", coach_id), &client_token)
        .await
        .unwrap();
    let marked: MarkReadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(marked.updated, 0);
}

#[tokio::test]
async fn test_blank_message_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let coach_token = server.coach_token(test_id()).unwrap();

    let message = CreateThreadMessageRequest::simple("   ");
    let response = server
        .post_auth(&format!("/api/v1/threads/{}/messages", test_id()), &coach_token, &message)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
