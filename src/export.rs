// src/export.rs

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::Product;

pub const CSV_HEADER: &str =
    "id,name,category,fabric,discountPrice,originalPrice,discountPercent,stock,trending";

/// Text fields are written as JSON string literals, which keeps commas and
/// quotes inside names from breaking the row.
fn quoted(value: &str) -> Result<String, AppError> {
    Ok(serde_json::to_string(value)?)
}

fn csv_row(product: &Product) -> Result<String, AppError> {
    let fields = [
        product.id.clone(),
        quoted(&product.name)?,
        quoted(&product.category.to_string())?,
        quoted(product.fabric_or_empty())?,
        product.discount_price.to_string(),
        product.original_price.to_string(),
        product.discount_percent.to_string(),
        if product.stock { "In Stock" } else { "Out of Stock" }.to_string(),
        if product.is_trending() { "Yes" } else { "No" }.to_string(),
    ];
    Ok(fields.join(","))
}

pub fn products_csv(products: &[Product]) -> Result<String, AppError> {
    let mut lines = Vec::with_capacity(products.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for product in products {
        lines.push(csv_row(product)?);
    }
    Ok(lines.join("\n"))
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("products_export_{}.csv", now.timestamp_millis())
}
