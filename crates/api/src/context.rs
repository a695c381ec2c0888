//! Request-scoped authentication context.
//!
//! Both values live in the request's extensions, so they are dropped with the
//! request and never shared between concurrent requests.

use std::ops::Deref;
use std::sync::Arc;

use axum::http::Request;

use gatehouse_auth::ClaimSet;

/// Verified claims for the current request.
///
/// Only [`attach`] creates one, and only from a verified [`ClaimSet`]. The
/// claims are behind an `Arc` and never handed out mutably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimContext(Arc<ClaimSet>);

impl ClaimContext {
    pub fn claims(&self) -> &ClaimSet {
        &self.0
    }
}

impl Deref for ClaimContext {
    type Target = ClaimSet;

    fn deref(&self) -> &ClaimSet {
        &self.0
    }
}

/// Attach verified claims to a request.
///
/// Returns `false` and keeps the existing claims if the request already
/// carries a context.
pub fn attach<B>(req: &mut Request<B>, claims: ClaimSet) -> bool {
    if req.extensions().get::<ClaimContext>().is_some() {
        tracing::warn!("claim context already attached; keeping the first");
        return false;
    }
    req.extensions_mut().insert(ClaimContext(Arc::new(claims)));
    true
}

/// Read the claims attached to a request, if any.
pub fn read<B>(req: &Request<B>) -> Option<&ClaimSet> {
    req.extensions().get::<ClaimContext>().map(ClaimContext::claims)
}

/// Subject of a request that passed its route policy.
///
/// Inserted by the policy layer on admit; handlers extract it with
/// `Extension<AuthenticatedSubject>` instead of re-reading claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthenticatedSubject(String);

impl AuthenticatedSubject {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AuthenticatedSubject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
