//! Authentication extractors
//!
//! Extracts and validates JWT tokens from the Authorization header. Role
//! enforcement happens here too: handlers take `AuthCoach` or `AuthClient`
//! when an endpoint is role-restricted.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use coach_common::auth::UserRole;
use coach_common::AppError;
use coach_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: Snowflake,
    /// Caller role from the JWT token
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser {
            user_id,
            role: claims.role,
        })
    }
}

/// Authenticated caller required to hold the coach role
#[derive(Debug, Clone, Copy)]
pub struct AuthCoach(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthCoach
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_coach() {
            return Err(ApiError::App(AppError::InsufficientPermissions));
        }
        Ok(AuthCoach(user))
    }
}

/// Authenticated caller required to hold the client role
#[derive(Debug, Clone, Copy)]
pub struct AuthClient(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthClient
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_client() {
            return Err(ApiError::App(AppError::InsufficientPermissions));
        }
        Ok(AuthClient(user))
    }
}
