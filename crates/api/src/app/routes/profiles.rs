use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::app::models::Profile;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthenticatedSubject;
use crate::policy::{admin_only, guarded, members, self_or_admin_read};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            guarded(get(list_profiles), members()).merge(guarded(post(create_profile), admin_only())),
        )
        .route("/:id", guarded(get(get_profile), self_or_admin_read()))
}

pub async fn list_profiles(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.profiles.list() {
        Ok(profiles) => Json(profiles).into_response(),
        Err(e) => errors::store_error_to_response("Profile", e),
    }
}

pub async fn create_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(subject): Extension<AuthenticatedSubject>,
    body: Result<Json<dto::CreateProfileRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let (Some(user_id), Some(display_name)) = (
        dto::required_text(&body.user_id),
        dto::required_text(&body.display_name),
    ) else {
        return errors::json_error(StatusCode::BAD_REQUEST, "user_id and display_name are required");
    };

    let profile = Profile {
        user_id: user_id.clone(),
        display_name,
        created_at: Utc::now(),
    };

    if let Err(e) = services.profiles.insert(user_id, profile.clone()) {
        return errors::store_error_to_response("Profile", e);
    }

    tracing::info!(created_by = %subject, owner = %profile.user_id, "profile created");
    (StatusCode::CREATED, Json(profile)).into_response()
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.profiles.get(&id) {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => errors::store_error_to_response("Profile", e),
    }
}
