// src/lib.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod auth_models;
pub mod catalogue;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod export;
pub mod extractor;
pub mod filters;
pub mod handlers;
pub mod inventory;
pub mod models;
pub mod pagination;
pub mod products;
pub mod seed;
pub mod state;
pub mod storage;
pub mod store;
pub mod uploads;
pub mod watcher;
pub mod wishlist;

use crate::handlers::*;
use crate::state::AppState;
use crate::uploads::MAX_FILES_PER_BATCH;

pub fn app(app_state: Arc<AppState>) -> Router {
    // A product JSON body can carry a full batch of base64 images (4/3 overhead).
    let body_limit = app_state
        .config
        .max_upload_bytes
        .saturating_mul(MAX_FILES_PER_BATCH)
        .saturating_mul(4)
        .div_ceil(3)
        .saturating_add(1024 * 1024);

    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/trending", get(trending_products))
        .route("/api/products/{id}", get(get_product_details))
        .route("/api/categories", get(list_categories))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/me", get(me_handler))
        .route("/api/wishlist", get(get_wishlist_handler))
        .route(
            "/api/wishlist/{product_id}",
            get(wishlist_membership_handler).post(toggle_wishlist_handler),
        )
        .route(
            "/api/admin/products",
            get(admin_list_products).post(create_product_handler),
        )
        .route("/api/admin/products/export", get(export_products_handler))
        .route(
            "/api/admin/products/{id}",
            put(update_product_handler).delete(delete_product_handler),
        )
        // Upload parts are streamed and size-checked per file in the handler.
        .route(
            "/api/admin/uploads",
            post(upload_images_handler).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/events", get(events_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state)
}
