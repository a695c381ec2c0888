use axum::{routing::get, Router};

use crate::policy::guarded;
use gatehouse_auth::RouteConfig;

pub mod accounts;
pub mod profiles;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints (mounted under `/api/v1`).
pub fn router() -> Router {
    Router::new()
        .route("/whoami", guarded(get(system::whoami), RouteConfig::authenticated()))
        .nest("/accounts", accounts::router())
        .nest("/profiles", profiles::router())
        .nest("/users", users::router())
}
