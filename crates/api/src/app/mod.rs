//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store wiring handed to handlers
//! - `store.rs`: storage trait and its in-memory implementation
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs` / `models.rs`: request bodies and response records
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use gatehouse_auth::{CredentialVerifier, Hs256Verifier};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

/// Build the full HTTP router with seeded in-memory stores.
pub fn build_app(jwt_secret: String) -> Router {
    let verifier = Arc::new(Hs256Verifier::new(jwt_secret.into_bytes()));
    build_app_with(verifier, Arc::new(services::AppServices::in_memory()))
}

/// Build the router around an injected verifier and services.
pub fn build_app_with(verifier: Arc<dyn CredentialVerifier>, services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState { verifier };

    // Protected routes: every request must carry a verified credential.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", protected)
}
