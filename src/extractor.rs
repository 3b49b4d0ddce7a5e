// src/extractor.rs
//
// The session lives in the store under `priya_user`, not in a cookie or a
// header, so every extractor re-reads it for each request.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

/// `Some(user)` when somebody is logged in. Never rejects; storage failures
/// are logged and treated as "no session".
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        match app_state.storage.current_user().await {
            Ok(user) => Ok(OptionalUser(user)),
            Err(e) => {
                tracing::error!("Could not read the session: {:?}", e);
                Ok(OptionalUser(None))
            }
        }
    }
}

/// Logged-in user, 401 otherwise.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        match app_state.storage.current_user().await? {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AppError::Unauthenticated("Please login to continue".into())),
        }
    }
}

/// Logged-in admin: 401 without a session, 403 for other roles.
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!("User {} tried to reach an admin endpoint", user.id);
            return Err(AppError::UnauthorizedAccess(
                "Admin access required".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}
