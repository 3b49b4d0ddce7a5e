// src/auth.rs
//
// Mock authentication against the stored account list. Passwords are kept and
// compared in plain text; this is not a security boundary.

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Role, User, UserRecord};
use crate::storage::Storage;

/// Linear scan for an exact email + password match. With duplicate emails the
/// earliest registered account wins.
pub async fn authenticate(storage: &Storage, email: &str, password: &str) -> Result<User, AppError> {
    let users = storage.user_records().await?;
    users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .map(User::from)
        .ok_or(AppError::InvalidLoginCredentials)
}

/// Appends a new `user` account. Existing emails are not checked.
pub async fn register(storage: &Storage, email: &str, password: &str) -> Result<User, AppError> {
    let mut users = storage.user_records().await?;
    if users.iter().any(|u| u.email == email) {
        tracing::warn!("Registering a second account for {}", email);
    }

    let record = UserRecord {
        id: format!("user-{}", Uuid::new_v4().simple()),
        email: email.to_string(),
        password: password.to_string(),
        role: Role::User,
    };
    users.push(record.clone());
    storage.save_user_records(&users).await?;

    tracing::info!("Registered user {} ({})", record.email, record.id);
    Ok(record.into())
}

pub async fn login(storage: &Storage, email: &str, password: &str) -> Result<User, AppError> {
    let user = match authenticate(storage, email, password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Failed login attempt for {}", email);
            return Err(e);
        }
    };
    storage.save_current_user(Some(&user)).await?;
    tracing::info!("User {} ({}) logged in", user.email, user.id);
    Ok(user)
}

/// Registers and immediately signs the new account in.
pub async fn register_and_login(storage: &Storage, email: &str, password: &str) -> Result<User, AppError> {
    let user = register(storage, email, password).await?;
    storage.save_current_user(Some(&user)).await?;
    Ok(user)
}

pub async fn logout(storage: &Storage) -> Result<(), AppError> {
    storage.save_current_user(None).await?;
    tracing::info!("Session cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    async fn seeded_storage() -> Storage {
        let storage = Storage::new(Arc::new(MemoryStore::new()));
        storage.initialize_defaults().await.unwrap();
        storage
    }

    #[tokio::test]
    async fn seeded_accounts_authenticate() {
        let storage = seeded_storage().await;
        let admin = authenticate(&storage, "admin@priyascollection.com", "admin123")
            .await
            .unwrap();
        assert_eq!(admin.id, "admin-1");
        assert!(admin.is_admin());

        let user = authenticate(&storage, "user@example.com", "user123").await.unwrap();
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn failures_are_generic() {
        let storage = seeded_storage().await;
        let wrong_password = authenticate(&storage, "user@example.com", "nope").await.unwrap_err();
        let unknown_email = authenticate(&storage, "who@example.com", "user123").await.unwrap_err();
        assert_eq!(wrong_password.message(), unknown_email.message());
        assert_eq!(wrong_password.message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn register_appends_user_role_and_logs_in() {
        let storage = seeded_storage().await;
        let user = register_and_login(&storage, "new@example.com", "pw").await.unwrap();

        assert_eq!(user.role, Role::User);
        assert!(user.id.starts_with("user-"));
        assert_eq!(storage.user_records().await.unwrap().len(), 3);
        assert_eq!(storage.current_user().await.unwrap(), Some(user.clone()));
        assert_eq!(authenticate(&storage, "new@example.com", "pw").await.unwrap(), user);
    }

    #[tokio::test]
    async fn duplicate_emails_are_accepted_and_first_match_wins() {
        let storage = seeded_storage().await;
        let first = register(&storage, "twin@example.com", "same").await.unwrap();
        let second = register(&storage, "twin@example.com", "same").await.unwrap();
        assert_ne!(first.id, second.id);

        let found = authenticate(&storage, "twin@example.com", "same").await.unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn login_and_logout_drive_the_session() {
        let storage = seeded_storage().await;
        assert!(login(&storage, "user@example.com", "bad").await.is_err());
        assert_eq!(storage.current_user().await.unwrap(), None);

        let user = login(&storage, "user@example.com", "user123").await.unwrap();
        assert_eq!(storage.current_user().await.unwrap(), Some(user));

        logout(&storage).await.unwrap();
        assert_eq!(storage.current_user().await.unwrap(), None);
    }
}
