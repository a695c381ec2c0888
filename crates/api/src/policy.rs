//! Route-level policy enforcement.
//!
//! Every protected route is wrapped with [`guarded`], which runs the route's
//! [`RouteConfig`] against the claims attached by
//! [`crate::middleware::auth_middleware`] before the handler is reached.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
    routing::MethodRouter,
};

use gatehouse_auth::{AccessDecision, PathParams, Role, RouteConfig, Scope, evaluate};

use crate::app::errors;
use crate::context::{AuthenticatedSubject, ClaimContext};

/// Attach `policy` to every method currently registered on `route`.
pub fn guarded(route: MethodRouter, policy: RouteConfig) -> MethodRouter {
    route.route_layer(axum::middleware::from_fn_with_state(Arc::new(policy), enforce))
}

async fn enforce(
    State(policy): State<Arc<RouteConfig>>,
    params: Option<Path<PathParams>>,
    mut req: Request,
    next: Next,
) -> Response {
    let params = params.map(|Path(p)| p).unwrap_or_default();
    let claims = req.extensions().get::<ClaimContext>().cloned();

    match evaluate(&policy, claims.as_deref(), &params) {
        AccessDecision::Admit => {
            if let Some(claims) = claims {
                tracing::debug!(subject = %claims.subject, path = %req.uri().path(), "access admitted");
                req.extensions_mut()
                    .insert(AuthenticatedSubject::new(claims.subject.clone()));
            }
            next.run(req).await
        }
        AccessDecision::Deny(denial) => {
            tracing::info!(
                stage = ?denial.stage,
                reason = denial.reason.code(),
                path = %req.uri().path(),
                "access denied"
            );
            errors::access_error_to_response(denial.reason)
        }
    }
}

/// Admin role only.
pub fn admin_only() -> RouteConfig {
    RouteConfig::authenticated().roles([Role::Admin])
}

/// Any known role.
pub fn members() -> RouteConfig {
    RouteConfig::authenticated().roles([Role::User, Role::Admin])
}

/// Caller reads their own resource (`:id`), or any resource as admin.
pub fn self_or_admin_read() -> RouteConfig {
    members().scopes([Scope::UserReadSelf, Scope::AdminReadAll])
}

/// Caller writes their own resource (`:id`), or any resource as admin.
pub fn self_or_admin_write() -> RouteConfig {
    members().scopes([Scope::UserWriteSelf, Scope::AdminWriteAll])
}

/// Caller must be the user named by `param`, whatever their role.
pub fn owner_of(param: &'static str) -> RouteConfig {
    members().owner_param(param)
}

/// Read scopes checked against `param`, then ownership of `param`.
///
/// For routes nested under a user whose own `:id` names a child resource.
pub fn owner_read(param: &'static str) -> RouteConfig {
    members()
        .scopes([Scope::UserReadSelf, Scope::AdminReadAll])
        .scope_param(param)
        .owner_param(param)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::StatusCode,
        routing::get,
        Extension, Router,
    };
    use chrono::{Duration, Utc};
    use gatehouse_auth::ClaimSet;
    use tower::ServiceExt;

    use super::*;
    use crate::context;

    async fn echo_subject(Extension(subject): Extension<AuthenticatedSubject>) -> String {
        subject.to_string()
    }

    /// Stand-in for the auth middleware: attaches fixed claims.
    async fn with_claims(State(claims): State<Option<ClaimSet>>, mut req: Request, next: Next) -> Response {
        if let Some(c) = claims {
            context::attach(&mut req, c);
        }
        next.run(req).await
    }

    fn app(policy: RouteConfig, claims: Option<ClaimSet>) -> Router {
        Router::new()
            .route("/items/:id", guarded(get(echo_subject), policy))
            .layer(axum::middleware::from_fn_with_state(claims, with_claims))
    }

    fn claims(subject: &str, role: Role) -> ClaimSet {
        ClaimSet::new(subject, role, Utc::now() + Duration::hours(1))
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, String) {
        let res = router
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn admitted_request_sees_subject() {
        let router = app(self_or_admin_read(), Some(claims("1", Role::User)));
        let (status, body) = call(router, "/items/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "1");
    }

    #[tokio::test]
    async fn scope_denial_is_403_json() {
        let router = app(self_or_admin_read(), Some(claims("1", Role::User)));
        let (status, body) = call(router, "/items/2").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Permission denied");
    }

    #[tokio::test]
    async fn missing_claims_is_401() {
        let router = app(self_or_admin_read(), None);
        let (status, body) = call(router, "/items/1").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "No claims found");
    }

    #[tokio::test]
    async fn owner_gate_reads_named_parameter() {
        let router = Router::new()
            .route("/users/:user_id/things", guarded(get(echo_subject), owner_of("user_id")))
            .layer(axum::middleware::from_fn_with_state(
                Some(claims("7", Role::Admin)),
                with_claims,
            ));

        let (status, _) = call(router.clone(), "/users/7/things").await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(router, "/users/8/things").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn owner_read_checks_scope_and_ownership_on_the_same_parameter() {
        use gatehouse_auth::Stage;

        let policy = owner_read("user_id");
        let params: PathParams = [("user_id", "2"), ("id", "1")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let stage = |c: &ClaimSet| match evaluate(&policy, Some(c), &params) {
            AccessDecision::Admit => None,
            AccessDecision::Deny(d) => Some(d.stage),
        };

        assert_eq!(stage(&claims("2", Role::User)), None);
        // `:id` matches the subject, but the scope reads `:user_id`.
        assert_eq!(stage(&claims("1", Role::User)), Some(Stage::Scope));
        assert_eq!(stage(&claims("9", Role::Admin)), Some(Stage::Ownership));
    }

    #[tokio::test]
    async fn route_without_parameters_still_evaluates() {
        let router = Router::new()
            .route("/admin", guarded(get(echo_subject), admin_only()))
            .layer(axum::middleware::from_fn_with_state(
                Some(claims("1", Role::User)),
                with_claims,
            ));

        let (status, _) = call(router, "/admin").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
