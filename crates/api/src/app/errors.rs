use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use gatehouse_auth::AccessError;

use crate::app::store::StoreError;

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}

pub fn access_error_to_response(err: AccessError) -> axum::response::Response {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::FORBIDDEN);
    json_error(status, err.to_string())
}

/// Map a storage failure for `resource` (e.g. "Account").
pub fn store_error_to_response(resource: &str, err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, format!("{resource} not found")),
        StoreError::Conflict => json_error(StatusCode::CONFLICT, format!("{resource} already exists")),
        StoreError::Unavailable => {
            tracing::error!(resource, "resource store unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
        }
    }
}

pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text())
}
