//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use noteforge_auth::TokenCodec;
use noteforge_store::Store;

use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(store: Store, codec: Arc<TokenCodec>) -> Router {
    let auth_state = AuthState {
        codec: codec.clone(),
        store: store.clone(),
    };

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::router(auth_state.clone()))
        .nest("/notes", routes::notes::router(auth_state.clone()))
        .nest("/tenants", routes::tenants::router(auth_state))
        .fallback(routes::system::not_found)
        .layer(Extension(store))
        .layer(Extension(codec))
}
