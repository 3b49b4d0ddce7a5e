// src/handlers.rs
use axum::Json;
use axum::{
    extract::{Multipart, Path, Query, State, multipart::Field},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::Utc;
use futures::stream::{self, Stream};
use serde::Serialize;
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::sync::broadcast::error::RecvError;
use validator::Validate;

use crate::auth;
use crate::auth_models::{LoginPayload, RegistrationPayload, SessionResponse};
use crate::catalogue::{self, PriceRange};
use crate::errors::AppError;
use crate::export::{export_filename, products_csv};
use crate::extractor::{AdminUser, CurrentUser, OptionalUser};
use crate::filters::{CatalogueParams, InventoryParams, catalogue_query_string};
use crate::inventory::{self, InventoryStats, InventoryQuery};
use crate::models::{ALL_CATEGORIES, Category, Product, User};
use crate::pagination::PaginatedResponse;
use crate::products::{ProductDraft, delete_product, find_product, save_product};
use crate::state::AppState;
use crate::storage::{ChangeOrigin, StoreEvent};
use crate::uploads::{
    CappedBuffer, MAX_FILES_PER_BATCH, MAX_URL_FIELD_BYTES, TOO_MANY_FILES, UploadReport,
    UploadedFile, normalize_image_urls, process_batch,
};
use crate::wishlist;

const WISHLIST_LOGIN_REQUIRED: &str = "Please login to add items to wishlist";

// --- Catalogue ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueResponse {
    pub products: Vec<Product>,
    pub total: usize,
    /// Lowest and highest price over the whole catalogue.
    pub bounds: PriceRange,
    /// Selected range, or the bounds when none was picked.
    pub price_range: PriceRange,
    pub has_active_filters: bool,
    /// Canonical `?` query for the current state, without the `?`.
    pub query_string: String,
}

pub async fn list_products(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<CatalogueParams>,
) -> Result<Json<CatalogueResponse>, AppError> {
    tracing::debug!("GET /api/products: {:?}", params);
    let all_products = app_state.storage.products().await?;
    let filter = params.to_filter();
    let bounds = catalogue::price_bounds(&all_products);

    let products = catalogue::apply(&all_products, &filter);
    tracing::info!("Catalogue: {} of {} products match", products.len(), all_products.len());

    Ok(Json(CatalogueResponse {
        total: products.len(),
        products,
        bounds,
        price_range: filter.effective_range(bounds),
        has_active_filters: filter.has_active_filters(bounds),
        query_string: catalogue_query_string(&filter, bounds),
    }))
}

pub async fn trending_products(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.storage.products().await?;
    Ok(Json(catalogue::trending(&products)))
}

pub async fn get_product_details(
    State(app_state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, AppError> {
    match find_product(&app_state.storage, &product_id).await {
        Ok(product) => Ok(Json(product)),
        Err(AppError::NotFound) => {
            tracing::warn!("Product {} not found", product_id);
            Err(AppError::NotFound)
        }
        Err(e) => Err(e),
    }
}

pub async fn list_categories() -> Json<Vec<String>> {
    let categories = std::iter::once(ALL_CATEGORIES.to_string())
        .chain(Category::iter().map(|c| c.to_string()))
        .collect();
    Json(categories)
}

// --- Auth ---

pub async fn login_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<SessionResponse>, AppError> {
    if let Err(validation_errors) = payload.validate() {
        tracing::warn!("Invalid login payload: {:?}", validation_errors);
        return Err(AppError::ValidationError(validation_errors));
    }
    let user = auth::login(&app_state.storage, &payload.email, &payload.password).await?;
    Ok(Json(user.into()))
}

pub async fn register_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    if let Err(validation_errors) = payload.validate() {
        tracing::warn!("Invalid registration payload: {:?}", validation_errors);
        return Err(AppError::ValidationError(validation_errors));
    }
    let user =
        auth::register_and_login(&app_state.storage, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn logout_handler(State(app_state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    auth::logout(&app_state.storage).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me_handler(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

// --- Wishlist ---

fn require_wishlist_user(user: Option<User>) -> Result<User, AppError> {
    user.ok_or_else(|| AppError::Unauthenticated(WISHLIST_LOGIN_REQUIRED.to_string()))
}

pub async fn get_wishlist_handler(
    State(app_state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
) -> Result<Json<Vec<Product>>, AppError> {
    let user = require_wishlist_user(user)?;
    let products = wishlist::wishlist_products(&app_state.storage, &user).await?;
    Ok(Json(products))
}

pub async fn wishlist_membership_handler(
    State(app_state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let user = require_wishlist_user(user)?;
    let wishlisted = wishlist::contains(&app_state.storage, &user, &product_id).await?;
    Ok(Json(json!({ "productId": product_id, "wishlisted": wishlisted })))
}

pub async fn toggle_wishlist_handler(
    State(app_state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    Path(product_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let user = require_wishlist_user(user)?;
    let wishlisted = wishlist::toggle(&app_state.storage, &user, &product_id).await?;
    Ok(Json(json!({ "productId": product_id, "wishlisted": wishlisted })))
}

// --- Admin ---

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    #[serde(flatten)]
    pub page: PaginatedResponse<Product>,
    pub stats: InventoryStats,
}

pub async fn admin_list_products(
    State(app_state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<InventoryParams>,
) -> Result<Json<InventoryResponse>, AppError> {
    tracing::debug!("GET /api/admin/products: {:?}", params);
    let products = app_state.storage.products().await?;
    let query: InventoryQuery = params.to_query();

    Ok(Json(InventoryResponse {
        stats: inventory::stats(&products),
        page: inventory::page(&products, &query),
    }))
}

pub async fn create_product_handler(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(mut draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    tracing::info!("Admin {} creating product '{}'", admin.email, draft.name);
    draft.id = None;
    let product = save_product(&app_state.storage, draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product_handler(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(product_id): Path<String>,
    Json(mut draft): Json<ProductDraft>,
) -> Result<Json<Product>, AppError> {
    tracing::info!("Admin {} saving product {}", admin.email, product_id);
    draft.id = Some(product_id);
    let product = save_product(&app_state.storage, draft).await?;
    Ok(Json(product))
}

pub async fn delete_product_handler(
    State(app_state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Path(product_id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::info!("Admin {} deleting product {}", admin.email, product_id);
    delete_product(&app_state.storage, &product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_products_handler(
    State(app_state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Query(params): Query<InventoryParams>,
) -> Result<(StatusCode, HeaderMap, String), AppError> {
    let products = app_state.storage.products().await?;
    let rows = inventory::filter_and_sort(&products, &params.to_query());
    let body = products_csv(&rows)?;
    let filename = export_filename(Utc::now());
    tracing::info!("Exporting {} products as {}", rows.len(), filename);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| AppError::InternalServerError(format!("Invalid header value: {}", e)))?;
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok((StatusCode::OK, headers, body))
}

async fn read_capped(field: &mut Field<'_>, limit: usize) -> Result<CappedBuffer, AppError> {
    let mut buffer = CappedBuffer::new(limit);
    while let Some(chunk) = field.chunk().await? {
        buffer.push(&chunk);
    }
    Ok(buffer)
}

/// Multipart batch: every part with a file name is an image, `url` text parts
/// are pasted image URLs. Accepted images come back as data URIs followed by
/// the pasted URLs; rejected files are listed in `errors`.
///
/// Parts are streamed: an oversized image is counted, discarded and reported
/// on its own instead of failing the request.
pub async fn upload_images_handler(
    State(app_state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    mut multipart: Multipart,
) -> Result<Json<UploadReport>, AppError> {
    let max_bytes = app_state.config.max_upload_bytes;
    let mut files = Vec::new();
    let mut pasted_urls = Vec::new();

    while let Some(mut field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        match file_name {
            Some(file_name) => {
                if files.len() == MAX_FILES_PER_BATCH {
                    tracing::warn!("Upload batch exceeds {} files", MAX_FILES_PER_BATCH);
                    return Err(AppError::BadRequest(TOO_MANY_FILES.to_string()));
                }
                let content_type = field.content_type().map(str::to_string);
                let buffer = read_capped(&mut field, max_bytes).await?;
                tracing::debug!(
                    "Upload part {}: {} ({:?}, {} bytes)",
                    field_name,
                    file_name,
                    content_type,
                    buffer.size()
                );
                files.push(UploadedFile {
                    file_name,
                    content_type,
                    size: buffer.size(),
                    bytes: buffer.into_bytes(),
                });
            }
            None if field_name == "url" || field_name == "urls" => {
                let buffer = read_capped(&mut field, MAX_URL_FIELD_BYTES).await?;
                if buffer.is_over_limit() {
                    tracing::warn!("Ignoring oversized '{}' field ({} bytes)", field_name, buffer.size());
                    continue;
                }
                let text = String::from_utf8_lossy(&buffer.into_bytes()).into_owned();
                pasted_urls.extend(text.lines().map(str::to_string));
            }
            None => {
                tracing::warn!("Ignoring unexpected form field '{}'", field_name);
            }
        }
    }

    if files.is_empty() && pasted_urls.is_empty() {
        return Err(AppError::BadRequest("No images were submitted".to_string()));
    }

    let mut report = process_batch(files, max_bytes);
    report.images.extend(normalize_image_urls(pasted_urls));
    tracing::info!(
        "Upload batch: {} accepted, {} rejected",
        report.images.len(),
        report.errors.len()
    );
    Ok(Json(report))
}

// --- Change notifications ---

fn event_name(origin: ChangeOrigin) -> &'static str {
    match origin {
        ChangeOrigin::Local => "local",
        ChangeOrigin::External => "external",
    }
}

fn to_sse(event: &StoreEvent) -> Option<Event> {
    match Event::default().event(event_name(event.origin)).json_data(event) {
        Ok(sse) => Some(sse),
        Err(e) => {
            tracing::error!("Could not encode change event {:?}: {}", event, e);
            None
        }
    }
}

pub async fn events_handler(
    State(app_state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!("New change-event subscriber");
    let receiver = app_state.storage.subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Some(sse) = to_sse(&event) {
                        return Some((Ok(sse), receiver));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Change-event subscriber lagged, {} events dropped", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
