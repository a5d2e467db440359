//! In-memory repository implementations for service unit tests
//!
//! These mirror the PostgreSQL repositories' contracts, including the
//! conditional claim in `deliver` and the conditional update in `confirm`,
//! so pipeline semantics can be tested without a database.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use coach_common::auth::JwtService;
use coach_core::entities::{
    Audience, Broadcast, BroadcastRecipient, BroadcastStatus, Client, ThreadMessage, Workout,
};
use coach_core::error::DomainError;
use coach_core::traits::{
    BroadcastQuery, BroadcastRepository, ClientRepository, Delivery, RecipientRepository,
    RepoResult, ThreadMessageRepository, WorkoutRepository,
};
use coach_core::value_objects::{Snowflake, SnowflakeGenerator};

use super::context::{ServiceContext, ServiceContextBuilder};

#[derive(Default)]
pub struct InMemoryBroadcastRepo {
    pub broadcasts: Mutex<HashMap<i64, Broadcast>>,
    pub thread_repo: Arc<InMemoryThreadRepo>,
    pub recipient_repo: Arc<InMemoryRecipientRepo>,
    /// Broadcast ids whose delivery should fail with a database error
    pub fail_deliver: Mutex<HashSet<i64>>,
}

impl InMemoryBroadcastRepo {
    pub fn insert(&self, broadcast: Broadcast) {
        self.broadcasts
            .lock()
            .unwrap()
            .insert(broadcast.id.into_inner(), broadcast);
    }

    pub fn status_of(&self, id: Snowflake) -> Option<BroadcastStatus> {
        self.broadcasts
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .map(|b| b.status)
    }
}

#[async_trait]
impl BroadcastRepository for InMemoryBroadcastRepo {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Broadcast>> {
        Ok(self.broadcasts.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_owned(&self, id: Snowflake, coach_id: Snowflake) -> RepoResult<Option<Broadcast>> {
        Ok(self
            .broadcasts
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .filter(|b| b.coach_id == coach_id)
            .cloned())
    }

    async fn find_by_coach(
        &self,
        coach_id: Snowflake,
        query: BroadcastQuery,
    ) -> RepoResult<Vec<Broadcast>> {
        let mut results: Vec<Broadcast> = self
            .broadcasts
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.coach_id == coach_id)
            .filter(|b| query.status.is_none_or(|s| b.status == s))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        results.truncate(usize::try_from(query.limit.clamp(1, 100)).unwrap_or(100));
        Ok(results)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> RepoResult<Vec<Broadcast>> {
        let mut results: Vec<Broadcast> = self
            .broadcasts
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.is_due(now))
            .cloned()
            .collect();
        results.sort_by_key(|b| (b.scheduled_at, b.id));
        Ok(results)
    }

    async fn create(&self, broadcast: &Broadcast) -> RepoResult<()> {
        self.insert(broadcast.clone());
        Ok(())
    }

    async fn cancel(&self, id: Snowflake, coach_id: Snowflake) -> RepoResult<bool> {
        let mut broadcasts = self.broadcasts.lock().unwrap();
        match broadcasts.get_mut(&id.into_inner()) {
            Some(b) if b.coach_id == coach_id && b.status == BroadcastStatus::Scheduled => {
                b.status = BroadcastStatus::Canceled;
                b.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deliver(&self, broadcast_id: Snowflake, deliveries: &[Delivery]) -> RepoResult<bool> {
        if self
            .fail_deliver
            .lock()
            .unwrap()
            .contains(&broadcast_id.into_inner())
        {
            return Err(DomainError::DatabaseError("injected failure".to_string()));
        }

        // Claim
        {
            let mut broadcasts = self.broadcasts.lock().unwrap();
            match broadcasts.get_mut(&broadcast_id.into_inner()) {
                Some(b) if b.status == BroadcastStatus::Scheduled => {
                    b.status = BroadcastStatus::Sent;
                    b.updated_at = Utc::now();
                }
                _ => return Ok(false),
            }
        }

        for delivery in deliveries {
            self.thread_repo.insert(delivery.message.clone());
            self.recipient_repo.insert_if_absent(delivery.recipient.clone());
        }
        Ok(true)
    }
}

#[derive(Default)]
pub struct InMemoryRecipientRepo {
    pub recipients: Mutex<Vec<BroadcastRecipient>>,
}

impl InMemoryRecipientRepo {
    fn insert_if_absent(&self, recipient: BroadcastRecipient) {
        let mut recipients = self.recipients.lock().unwrap();
        let exists = recipients
            .iter()
            .any(|r| r.message_id == recipient.message_id && r.client_id == recipient.client_id);
        if !exists {
            recipients.push(recipient);
        }
    }
}

#[async_trait]
impl RecipientRepository for InMemoryRecipientRepo {
    async fn find(
        &self,
        broadcast_id: Snowflake,
        client_id: Snowflake,
    ) -> RepoResult<Option<BroadcastRecipient>> {
        Ok(self
            .recipients
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.message_id == broadcast_id && r.client_id == client_id)
            .cloned())
    }

    async fn find_by_broadcast(&self, broadcast_id: Snowflake) -> RepoResult<Vec<BroadcastRecipient>> {
        Ok(self
            .recipients
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.message_id == broadcast_id)
            .cloned()
            .collect())
    }

    async fn confirm(&self, broadcast_id: Snowflake, client_id: Snowflake) -> RepoResult<bool> {
        let mut recipients = self.recipients.lock().unwrap();
        match recipients
            .iter_mut()
            .find(|r| r.message_id == broadcast_id && r.client_id == client_id)
        {
            Some(r) if r.confirmed_at.is_none() => {
                r.confirmed_at = Some(Utc::now());
                r.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryThreadRepo {
    pub messages: Mutex<Vec<ThreadMessage>>,
}

impl InMemoryThreadRepo {
    fn insert(&self, message: ThreadMessage) {
        self.messages.lock().unwrap().push(message);
    }
}

#[async_trait]
impl ThreadMessageRepository for InMemoryThreadRepo {
    async fn find_thread(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        after: Option<Snowflake>,
        limit: i64,
    ) -> RepoResult<Vec<ThreadMessage>> {
        let mut results: Vec<ThreadMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.coach_id == coach_id && m.client_id == client_id)
            .filter(|m| after.is_none_or(|cursor| m.id > cursor))
            .cloned()
            .collect();
        results.sort_by_key(|m| (m.created_at, m.id));
        results.truncate(usize::try_from(limit.clamp(1, 100)).unwrap_or(100));
        Ok(results)
    }

    async fn create(&self, message: &ThreadMessage) -> RepoResult<()> {
        self.insert(message.clone());
        Ok(())
    }

    async fn mark_read(
        &self,
        coach_id: Snowflake,
        client_id: Snowflake,
        reader_id: Snowflake,
    ) -> RepoResult<u64> {
        let mut updated = 0;
        for message in self.messages.lock().unwrap().iter_mut() {
            if message.coach_id == coach_id
                && message.client_id == client_id
                && message.sender_id != reader_id
                && message.read_at.is_none()
            {
                message.read_at = Some(Utc::now());
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[derive(Default)]
pub struct InMemoryClientRepo {
    pub clients: Mutex<HashMap<i64, Client>>,
}

impl InMemoryClientRepo {
    pub fn insert(&self, client: Client) {
        self.clients
            .lock()
            .unwrap()
            .insert(client.id.into_inner(), client);
    }

    pub fn set_active(&self, id: Snowflake, is_active: bool) {
        if let Some(client) = self.clients.lock().unwrap().get_mut(&id.into_inner()) {
            client.is_active = is_active;
        }
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepo {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Client>> {
        Ok(self.clients.lock().unwrap().get(&id.into_inner()).cloned())
    }

    async fn find_active_by_coach(&self, coach_id: Snowflake) -> RepoResult<Vec<Client>> {
        let mut results: Vec<Client> = self
            .clients
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.coach_id == coach_id && c.is_active)
            .cloned()
            .collect();
        results.sort_by_key(|c| c.id);
        Ok(results)
    }
}

#[derive(Default)]
pub struct InMemoryWorkoutRepo {
    pub workouts: Mutex<HashMap<i64, Workout>>,
}

impl InMemoryWorkoutRepo {
    pub fn insert(&self, workout: Workout) {
        self.workouts
            .lock()
            .unwrap()
            .insert(workout.id.into_inner(), workout);
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryWorkoutRepo {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Workout>> {
        Ok(self.workouts.lock().unwrap().get(&id.into_inner()).cloned())
    }
}

/// Handles to the in-memory stores backing a test [`ServiceContext`]
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub broadcast_repo: Arc<InMemoryBroadcastRepo>,
    pub recipient_repo: Arc<InMemoryRecipientRepo>,
    pub thread_repo: Arc<InMemoryThreadRepo>,
    pub client_repo: Arc<InMemoryClientRepo>,
    pub workout_repo: Arc<InMemoryWorkoutRepo>,
}

impl TestHarness {
    pub fn new() -> Self {
        let thread_repo = Arc::new(InMemoryThreadRepo::default());
        let recipient_repo = Arc::new(InMemoryRecipientRepo::default());
        let broadcast_repo = Arc::new(InMemoryBroadcastRepo {
            thread_repo: Arc::clone(&thread_repo),
            recipient_repo: Arc::clone(&recipient_repo),
            ..Default::default()
        });
        let client_repo = Arc::new(InMemoryClientRepo::default());
        let workout_repo = Arc::new(InMemoryWorkoutRepo::default());

        let ctx = ServiceContextBuilder::new()
            .broadcast_repo(Arc::clone(&broadcast_repo) as Arc<dyn BroadcastRepository>)
            .recipient_repo(Arc::clone(&recipient_repo) as Arc<dyn RecipientRepository>)
            .thread_repo(Arc::clone(&thread_repo) as Arc<dyn ThreadMessageRepository>)
            .client_repo(Arc::clone(&client_repo) as Arc<dyn ClientRepository>)
            .workout_repo(Arc::clone(&workout_repo) as Arc<dyn WorkoutRepository>)
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .unwrap();

        Self {
            ctx,
            broadcast_repo,
            recipient_repo,
            thread_repo,
            client_repo,
            workout_repo,
        }
    }

    pub fn add_active_client(&self, coach_id: Snowflake) -> Snowflake {
        let id = self.ctx.generate_id();
        let now = Utc::now();
        self.client_repo.insert(Client {
            id,
            coach_id,
            name: format!("client-{id}"),
            is_active: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn add_due_broadcast(&self, coach_id: Snowflake, audience: Audience) -> Snowflake {
        let id = self.ctx.generate_id();
        self.broadcast_repo.insert(Broadcast::new(
            id,
            coach_id,
            Some("Schedule change".to_string()),
            "Session moved to 6pm.".to_string(),
            Utc::now() - chrono::Duration::seconds(1),
            true,
            audience,
            None,
        ));
        id
    }
}
