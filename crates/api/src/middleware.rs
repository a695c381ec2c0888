use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use gatehouse_auth::{AccessError, CredentialVerifier, VerificationError};

use crate::app::errors;
use crate::context;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn CredentialVerifier>,
}

/// Verify the bearer credential and attach its claims to the request.
///
/// Any verification failure ends the request with 401; the handler and the
/// route policy never see it.
pub async fn auth_middleware(State(state): State<AuthState>, mut req: Request, next: Next) -> Response {
    let verified = authorization_header(req.headers()).and_then(|header| state.verifier.verify(header));

    let claims = match verified {
        Ok(claims) => claims,
        Err(e) => {
            let err = AccessError::from(e);
            tracing::info!(reason = err.code(), path = %req.uri().path(), "credential rejected");
            return errors::access_error_to_response(err);
        }
    };

    tracing::debug!(subject = %claims.subject, role = %claims.role, "credential verified");
    context::attach(&mut req, claims);

    next.run(req).await
}

/// Raw `Authorization` value; an absent header reads as empty.
fn authorization_header(headers: &HeaderMap) -> Result<&str, VerificationError> {
    match headers.get(AUTHORIZATION) {
        None => Ok(""),
        Some(value) => value.to_str().map_err(|_| VerificationError::Invalid),
    }
}
