use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::app::store::StoreError;
use crate::policy::{guarded, owner_of, owner_read};

/// Routes nested under a user's identity. Only that user gets through,
/// admins included.
pub fn router() -> Router {
    Router::new()
        .route("/:user_id/profile", guarded(get(get_user_profile), owner_of("user_id")))
        .route(
            "/:user_id/transactions/:id",
            guarded(get(get_user_transaction), owner_read("user_id")),
        )
}

pub async fn get_user_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(user_id): Path<String>,
) -> axum::response::Response {
    match services.profiles.get(&user_id) {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => errors::store_error_to_response("Profile", e),
    }
}

/// A transaction that exists but belongs to someone else reads as not found.
pub async fn get_user_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path((user_id, id)): Path<(String, String)>,
) -> axum::response::Response {
    match services.transactions.get(&id) {
        Ok(tx) if tx.user_id == user_id => Json(tx).into_response(),
        Ok(_) => errors::store_error_to_response("Transaction", StoreError::NotFound),
        Err(e) => errors::store_error_to_response("Transaction", e),
    }
}
