// src/products.rs
//
// Admin create / update / delete. Saving validates the whole draft first and
// writes the catalogue only when it passes, so a rejected save changes nothing.

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::AppError;
use crate::models::{Category, Product, discount_percent};
use crate::storage::Storage;
use crate::uploads::normalize_image_urls;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn discount_within_original(draft: &ProductDraft) -> Result<(), ValidationError> {
    if draft.discount_price > draft.original_price {
        let mut error = ValidationError::new("discount_exceeds_original");
        error.message = Some("Discounted price cannot exceed original price".into());
        return Err(error);
    }
    Ok(())
}

/// Product as submitted from the admin form. `discountPercent` is not part of
/// it; it is always derived from the two prices.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "discount_within_original"))]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<String>,

    #[validate(custom(function = "not_blank", message = "Product name is required"))]
    pub name: String,

    pub category: Category,

    #[serde(default)]
    pub fabric: Option<String>,

    #[validate(custom(function = "not_blank", message = "Product description is required"))]
    pub description: String,

    #[validate(range(min = 1, message = "Prices must be greater than 0"))]
    pub original_price: i64,

    #[validate(range(min = 1, message = "Prices must be greater than 0"))]
    pub discount_price: i64,

    #[serde(default = "default_stock")]
    pub stock: bool,

    #[validate(length(min = 1, message = "At least one product image is required"))]
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub trending: Option<bool>,

    #[serde(default)]
    pub sizes: Option<Vec<String>>,

    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

fn default_stock() -> bool {
    true
}

impl ProductDraft {
    /// Trims image URLs and drops blank ones.
    fn normalize(mut self) -> Self {
        self.images = normalize_image_urls(&self.images);
        self.fabric = self
            .fabric
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        self
    }

    fn into_product(self, id: String) -> Product {
        Product {
            id,
            discount_percent: discount_percent(self.original_price, self.discount_price),
            name: self.name,
            category: self.category,
            fabric: self.fabric,
            description: self.description,
            original_price: self.original_price,
            discount_price: self.discount_price,
            stock: self.stock,
            images: self.images,
            trending: self.trending,
            sizes: self.sizes,
            colors: self.colors,
        }
    }
}

pub fn new_product_id() -> String {
    format!("product-{}", Uuid::new_v4().simple())
}

pub async fn find_product(storage: &Storage, product_id: &str) -> Result<Product, AppError> {
    storage
        .products()
        .await?
        .into_iter()
        .find(|p| p.id == product_id)
        .ok_or(AppError::NotFound)
}

/// Validates, recomputes the discount and upserts by id: an existing id is
/// replaced in place, anything else is appended.
pub async fn save_product(storage: &Storage, draft: ProductDraft) -> Result<Product, AppError> {
    let draft = draft.normalize();
    if let Err(validation_errors) = draft.validate() {
        tracing::warn!("Rejected product save: {:?}", validation_errors);
        return Err(AppError::ValidationError(validation_errors));
    }

    let id = draft.id.clone().unwrap_or_else(new_product_id);
    let product = draft.into_product(id);

    let mut products = storage.products().await?;
    match products.iter().position(|p| p.id == product.id) {
        Some(index) => {
            products[index] = product.clone();
            tracing::info!("Updated product {}", product.id);
        }
        None => {
            products.push(product.clone());
            tracing::info!("Added product {}", product.id);
        }
    }
    storage.save_products(&products).await?;
    Ok(product)
}

pub async fn delete_product(storage: &Storage, product_id: &str) -> Result<(), AppError> {
    let mut products = storage.products().await?;
    let before = products.len();
    products.retain(|p| p.id != product_id);
    if products.len() == before {
        tracing::warn!("Delete: product {} not found", product_id);
        return Err(AppError::NotFound);
    }
    storage.save_products(&products).await?;
    tracing::info!("Deleted product {}", product_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::DEFAULT_PRODUCTS;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    async fn seeded_storage() -> Storage {
        let storage = Storage::new(Arc::new(MemoryStore::new()));
        storage.initialize_defaults().await.unwrap();
        storage
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            id: None,
            name: "Mirror Work Blouse".into(),
            category: Category::Blouses,
            fabric: Some("Cotton Silk".into()),
            description: "Hand mirror work.".into(),
            original_price: 1000,
            discount_price: 750,
            stock: true,
            images: vec!["https://example.com/blouse.jpg".into()],
            trending: None,
            sizes: None,
            colors: None,
        }
    }

    fn field_rejected(err: &AppError, field: &str) -> bool {
        match err {
            AppError::ValidationError(errors) => {
                errors.field_errors().keys().any(|k| **k == *field)
            }
            _ => false,
        }
    }

    #[tokio::test]
    async fn create_recomputes_discount_percent() {
        let storage = seeded_storage().await;
        let saved = save_product(&storage, draft()).await.unwrap();

        assert_eq!(saved.discount_percent, 25);
        assert!(saved.id.starts_with("product-"));

        let products = storage.products().await.unwrap();
        assert_eq!(products.len(), DEFAULT_PRODUCTS.len() + 1);
        assert_eq!(products.last().unwrap(), &saved);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let storage = seeded_storage().await;
        let mut update = draft();
        update.id = Some("3".into());
        update.category = Category::Sarees;
        update.original_price = 9000;
        update.discount_price = 6000;

        let saved = save_product(&storage, update).await.unwrap();
        assert_eq!(saved.discount_percent, 33);

        let products = storage.products().await.unwrap();
        assert_eq!(products.len(), DEFAULT_PRODUCTS.len());
        assert_eq!(products[2], saved);
    }

    #[tokio::test]
    async fn rejected_saves_leave_catalogue_untouched() {
        let storage = seeded_storage().await;

        let mut too_cheap_original = draft();
        too_cheap_original.discount_price = 1200;
        let err = save_product(&storage, too_cheap_original).await.unwrap_err();
        assert!(field_rejected(&err, "__all__"));
        assert!(err.message().contains("cannot exceed original price"));

        let mut blank_name = draft();
        blank_name.name = "   ".into();
        let err = save_product(&storage, blank_name).await.unwrap_err();
        assert!(field_rejected(&err, "name"));

        let mut blank_description = draft();
        blank_description.description = String::new();
        let err = save_product(&storage, blank_description).await.unwrap_err();
        assert!(field_rejected(&err, "description"));

        let mut no_images = draft();
        no_images.images = vec!["   ".into()];
        let err = save_product(&storage, no_images).await.unwrap_err();
        assert!(field_rejected(&err, "images"));

        let mut zero_price = draft();
        zero_price.discount_price = 0;
        let err = save_product(&storage, zero_price).await.unwrap_err();
        assert!(field_rejected(&err, "discount_price"));

        assert_eq!(storage.products().await.unwrap(), *DEFAULT_PRODUCTS);
    }

    #[tokio::test]
    async fn incoming_discount_percent_is_not_trusted() {
        let json = r#"{
            "name": "Kurti", "category": "Kurti", "description": "d",
            "originalPrice": 2000, "discountPrice": 1500, "discountPercent": 90,
            "images": [" https://example.com/k.jpg "]
        }"#;
        let draft: ProductDraft = serde_json::from_str(json).unwrap();
        let storage = seeded_storage().await;
        let saved = save_product(&storage, draft).await.unwrap();
        assert_eq!(saved.discount_percent, 25);
        assert_eq!(saved.images, vec!["https://example.com/k.jpg".to_string()]);
        assert!(saved.stock);
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let storage = seeded_storage().await;
        delete_product(&storage, "4").await.unwrap();
        assert!(matches!(find_product(&storage, "4").await, Err(AppError::NotFound)));
        assert_eq!(storage.products().await.unwrap().len(), DEFAULT_PRODUCTS.len() - 1);

        assert!(matches!(
            delete_product(&storage, "4").await,
            Err(AppError::NotFound)
        ));
    }
}
