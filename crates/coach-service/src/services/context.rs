//! Service context - dependency container for services
//!
//! Holds the repositories and shared services the application layer runs
//! against. Repositories are trait objects so tests can substitute in-memory
//! implementations.

use std::sync::Arc;

use coach_common::auth::JwtService;
use coach_core::traits::{
    BroadcastRepository, ClientRepository, RecipientRepository, ThreadMessageRepository,
    WorkoutRepository,
};
use coach_core::SnowflakeGenerator;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    broadcast_repo: Arc<dyn BroadcastRepository>,
    recipient_repo: Arc<dyn RecipientRepository>,
    thread_repo: Arc<dyn ThreadMessageRepository>,
    client_repo: Arc<dyn ClientRepository>,
    workout_repo: Arc<dyn WorkoutRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        broadcast_repo: Arc<dyn BroadcastRepository>,
        recipient_repo: Arc<dyn RecipientRepository>,
        thread_repo: Arc<dyn ThreadMessageRepository>,
        client_repo: Arc<dyn ClientRepository>,
        workout_repo: Arc<dyn WorkoutRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            broadcast_repo,
            recipient_repo,
            thread_repo,
            client_repo,
            workout_repo,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the broadcast repository
    pub fn broadcast_repo(&self) -> &dyn BroadcastRepository {
        self.broadcast_repo.as_ref()
    }

    /// Get the recipient repository
    pub fn recipient_repo(&self) -> &dyn RecipientRepository {
        self.recipient_repo.as_ref()
    }

    /// Get the thread message repository
    pub fn thread_repo(&self) -> &dyn ThreadMessageRepository {
        self.thread_repo.as_ref()
    }

    /// Get the client repository
    pub fn client_repo(&self) -> &dyn ClientRepository {
        self.client_repo.as_ref()
    }

    /// Get the workout repository
    pub fn workout_repo(&self) -> &dyn WorkoutRepository {
        self.workout_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> coach_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    broadcast_repo: Option<Arc<dyn BroadcastRepository>>,
    recipient_repo: Option<Arc<dyn RecipientRepository>>,
    thread_repo: Option<Arc<dyn ThreadMessageRepository>>,
    client_repo: Option<Arc<dyn ClientRepository>>,
    workout_repo: Option<Arc<dyn WorkoutRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcast_repo(mut self, repo: Arc<dyn BroadcastRepository>) -> Self {
        self.broadcast_repo = Some(repo);
        self
    }

    pub fn recipient_repo(mut self, repo: Arc<dyn RecipientRepository>) -> Self {
        self.recipient_repo = Some(repo);
        self
    }

    pub fn thread_repo(mut self, repo: Arc<dyn ThreadMessageRepository>) -> Self {
        self.thread_repo = Some(repo);
        self
    }

    pub fn client_repo(mut self, repo: Arc<dyn ClientRepository>) -> Self {
        self.client_repo = Some(repo);
        self
    }

    pub fn workout_repo(mut self, repo: Arc<dyn WorkoutRepository>) -> Self {
        self.workout_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.broadcast_repo
                .ok_or_else(|| ServiceError::validation("broadcast_repo is required"))?,
            self.recipient_repo
                .ok_or_else(|| ServiceError::validation("recipient_repo is required"))?,
            self.thread_repo
                .ok_or_else(|| ServiceError::validation("thread_repo is required"))?,
            self.client_repo
                .ok_or_else(|| ServiceError::validation("client_repo is required"))?,
            self.workout_repo
                .ok_or_else(|| ServiceError::validation("workout_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
