// src/models.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Filter value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Kurti,
    #[serde(rename = "Kurta Sets")]
    #[strum(serialize = "Kurta Sets")]
    KurtaSets,
    Sarees,
    #[serde(rename = "Ready to Wear Sarees")]
    #[strum(serialize = "Ready to Wear Sarees")]
    ReadyToWearSarees,
    Blouses,
    Lehengas,
    Palazzos,
    #[serde(rename = "Indo Western Dress")]
    #[strum(serialize = "Indo Western Dress")]
    IndoWesternDress,
    Dupattas,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    pub description: String,
    pub original_price: i64,
    pub discount_price: i64,
    pub discount_percent: i64,
    pub stock: bool,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Product {
    pub fn is_trending(&self) -> bool {
        self.trending.unwrap_or(false)
    }

    pub fn fabric_or_empty(&self) -> &str {
        self.fabric.as_deref().unwrap_or("")
    }
}

/// `round((original - discount) / original * 100)`, 0 for a non-positive original price.
pub fn discount_percent(original_price: i64, discount_price: i64) -> i64 {
    if original_price <= 0 {
        return 0;
    }
    let ratio = (original_price - discount_price) as f64 / original_price as f64;
    (ratio * 100.0).round() as i64
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Public projection of an account. This is what the session holds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Stored account, including the plaintext password used for lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            email: record.email,
            role: record.role,
        }
    }
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        User {
            id: record.id.clone(),
            email: record.email.clone(),
            role: record.role,
        }
    }
}
