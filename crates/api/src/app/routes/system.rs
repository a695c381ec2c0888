use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::{AuthenticatedSubject, ClaimContext};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(subject): Extension<AuthenticatedSubject>,
    Extension(claims): Extension<ClaimContext>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "subject": subject.as_str(),
        "role": claims.role.as_str(),
        "scopes": claims.scopes,
        "expires_at": claims.expiry.to_rfc3339(),
    }))
}
