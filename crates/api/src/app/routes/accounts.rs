use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;

use crate::app::models::Account;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthenticatedSubject;
use crate::policy::{admin_only, guarded, self_or_admin_read, self_or_admin_write};

pub fn router() -> Router {
    Router::new()
        .route("/", guarded(get(list_accounts).post(create_account), admin_only()))
        .route(
            "/:id",
            guarded(get(get_account), self_or_admin_read())
                .merge(guarded(put(update_account).delete(delete_account), self_or_admin_write())),
        )
}

pub async fn list_accounts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.accounts.list() {
        Ok(accounts) => Json(accounts).into_response(),
        Err(e) => errors::store_error_to_response("Account", e),
    }
}

pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(subject): Extension<AuthenticatedSubject>,
    body: Result<Json<dto::CreateAccountRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let (Some(user_id), Some(name)) = (dto::required_text(&body.user_id), dto::required_text(&body.name)) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "user_id and name are required");
    };

    let account = Account {
        user_id: user_id.clone(),
        name,
        created_at: Utc::now(),
    };

    if let Err(e) = services.accounts.insert(user_id, account.clone()) {
        return errors::store_error_to_response("Account", e);
    }

    tracing::info!(created_by = %subject, owner = %account.user_id, "account created");
    (StatusCode::CREATED, Json(account)).into_response()
}

pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.accounts.get(&id) {
        Ok(account) => Json(account).into_response(),
        Err(e) => errors::store_error_to_response("Account", e),
    }
}

pub async fn update_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(subject): Extension<AuthenticatedSubject>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateAccountRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let Some(name) = dto::required_text(&body.name) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "name is required");
    };

    let current = match services.accounts.get(&id) {
        Ok(a) => a,
        Err(e) => return errors::store_error_to_response("Account", e),
    };
    let updated = Account { name, ..current };

    if let Err(e) = services.accounts.replace(&id, updated.clone()) {
        return errors::store_error_to_response("Account", e);
    }

    tracing::info!(subject = %subject, owner = %id, "account updated");
    Json(updated).into_response()
}

pub async fn delete_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(subject): Extension<AuthenticatedSubject>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = services.accounts.remove(&id) {
        return errors::store_error_to_response("Account", e);
    }

    tracing::info!(subject = %subject, owner = %id, "account deleted");
    Json(serde_json::json!({ "message": "Account deleted" })).into_response()
}
