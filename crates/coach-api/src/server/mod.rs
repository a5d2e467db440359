//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use coach_common::{AppConfig, AppError, JwtService};
use coach_core::SnowflakeGenerator;
use coach_db::{
    create_pool, run_migrations, PgBroadcastRepository, PgClientRepository,
    PgRecipientRepository, PgThreadMessageRepository, PgWorkoutRepository,
};
use coach_service::{BroadcastScheduler, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and default middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router());
    // Health routes skip the middleware stack so probes stay cheap
    router.merge(health_routes()).with_state(state)
}

/// Build the application with rate limiting and configured CORS
pub fn create_app_with_config(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = coach_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply pending migrations
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories
    let broadcast_repo = Arc::new(PgBroadcastRepository::new(pool.clone()));
    let recipient_repo = Arc::new(PgRecipientRepository::new(pool.clone()));
    let thread_repo = Arc::new(PgThreadMessageRepository::new(pool.clone()));
    let client_repo = Arc::new(PgClientRepository::new(pool.clone()));
    let workout_repo = Arc::new(PgWorkoutRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .broadcast_repo(broadcast_repo)
        .recipient_repo(recipient_repo)
        .thread_repo(thread_repo)
        .client_repo(client_repo)
        .workout_repo(workout_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Start the broadcast scheduler if this instance is elected to run it
    let scheduler = if state.config().scheduler.enabled {
        let scheduler = BroadcastScheduler::new(
            state.service_context().clone(),
            Duration::from_secs(state.config().scheduler.interval_secs),
        );
        scheduler.start();
        Some(scheduler)
    } else {
        info!("Broadcast scheduler disabled on this instance");
        None
    };

    // Build application
    let app = create_app_with_config(state);

    // Run server
    let result = run_server(app, addr).await;

    if let Some(scheduler) = scheduler {
        scheduler.stop();
    }

    result
}
