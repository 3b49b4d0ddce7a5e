// src/wishlist.rs

use crate::errors::AppError;
use crate::models::{Product, User};
use crate::storage::Storage;

/// Adds or removes `product_id` and returns whether it is now in the wishlist.
pub async fn toggle(storage: &Storage, user: &User, product_id: &str) -> Result<bool, AppError> {
    let mut wishlist = storage.wishlist(&user.id).await?;
    let now_wishlisted = if wishlist.iter().any(|id| id == product_id) {
        wishlist.retain(|id| id != product_id);
        false
    } else {
        wishlist.push(product_id.to_string());
        true
    };
    storage.save_wishlist(&user.id, &wishlist).await?;

    tracing::info!(
        "Wishlist of {}: product {} {}",
        user.id,
        product_id,
        if now_wishlisted { "added" } else { "removed" }
    );
    Ok(now_wishlisted)
}

pub async fn contains(storage: &Storage, user: &User, product_id: &str) -> Result<bool, AppError> {
    Ok(storage
        .wishlist(&user.id)
        .await?
        .iter()
        .any(|id| id == product_id))
}

/// Wishlisted products in catalogue order. Ids of deleted products are skipped.
pub async fn wishlist_products(storage: &Storage, user: &User) -> Result<Vec<Product>, AppError> {
    let ids = storage.wishlist(&user.id).await?;
    let products = storage.products().await?;
    Ok(products
        .into_iter()
        .filter(|p| ids.contains(&p.id))
        .collect())
}
