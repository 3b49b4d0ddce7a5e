// src/storage.rs

use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::errors::AppError;
use crate::models::{Product, User, UserRecord};
use crate::seed::{DEFAULT_PRODUCTS, default_users};
use crate::store::KeyValueStore;

pub const PRODUCTS_KEY: &str = "priya_products";
pub const USERS_KEY: &str = "priya_users";
pub const SESSION_USER_KEY: &str = "priya_user";
pub const WISHLIST_KEY_PREFIX: &str = "priya_wishlist";

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub fn wishlist_key(user_id: &str) -> String {
    format!("{}_{}", WISHLIST_KEY_PREFIX, user_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    Local,
    External,
}

/// Published after every write, and after an external reload of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEvent {
    /// Changed key; `None` when the whole store was reloaded.
    pub key: Option<String>,
    pub origin: ChangeOrigin,
}

/// Typed, JSON-encoded view over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<StoreEvent>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { store, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub(crate) fn publish(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Parsed value under `key`, or `None` when missing or unreadable.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let Some(raw) = self.store.get_item(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable value under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(key, raw).await?;
        self.publish(StoreEvent {
            key: Some(key.to_string()),
            origin: ChangeOrigin::Local,
        });
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.store.remove_item(key).await?;
        self.publish(StoreEvent {
            key: Some(key.to_string()),
            origin: ChangeOrigin::Local,
        });
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.store.get_item(key).await?.is_some())
    }

    /// Seeds products and users when their keys are absent.
    pub async fn initialize_defaults(&self) -> Result<(), AppError> {
        if !self.contains(PRODUCTS_KEY).await? {
            tracing::info!("Seeding default catalogue ({} products)", DEFAULT_PRODUCTS.len());
            self.set(PRODUCTS_KEY, DEFAULT_PRODUCTS.as_slice()).await?;
        }
        if !self.contains(USERS_KEY).await? {
            tracing::info!("Seeding default accounts");
            self.set(USERS_KEY, &default_users()).await?;
        }
        Ok(())
    }

    /// Checks the backend for edits made outside this process.
    pub async fn reload_external(&self) -> Result<bool, AppError> {
        self.store.reload_external().await
    }

    // --- Products ---

    pub async fn products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self
            .get(PRODUCTS_KEY)
            .await?
            .unwrap_or_else(|| DEFAULT_PRODUCTS.clone()))
    }

    pub async fn save_products(&self, products: &[Product]) -> Result<(), AppError> {
        self.set(PRODUCTS_KEY, products).await
    }

    // --- Users ---

    pub async fn user_records(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(self.get(USERS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_user_records(&self, users: &[UserRecord]) -> Result<(), AppError> {
        self.set(USERS_KEY, users).await
    }

    // --- Wishlist ---

    pub async fn wishlist(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        Ok(self.get(&wishlist_key(user_id)).await?.unwrap_or_default())
    }

    pub async fn save_wishlist(&self, user_id: &str, product_ids: &[String]) -> Result<(), AppError> {
        self.set(&wishlist_key(user_id), product_ids).await
    }

    // --- Session ---

    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        self.get(SESSION_USER_KEY).await
    }

    pub async fn save_current_user(&self, user: Option<&User>) -> Result<(), AppError> {
        match user {
            Some(user) => self.set(SESSION_USER_KEY, user).await,
            None => self.remove(SESSION_USER_KEY).await,
        }
    }
}
