// src/auth_models.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationPayload {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login / register response. `redirect` is where the original storefront sends
/// the user next: admins to the dashboard, everyone else to the catalogue.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
    pub redirect: &'static str,
}

impl From<User> for SessionResponse {
    fn from(user: User) -> Self {
        let redirect = if user.is_admin() { "/admin" } else { "/" };
        SessionResponse { user, redirect }
    }
}
