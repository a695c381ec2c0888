//! Individual pass/fail checks composed by [`crate::policy`].
//!
//! Gates are total functions over an already verified [`ClaimSet`]; checking
//! that claims exist at all is the composer's job.

use std::collections::BTreeSet;

use crate::{ClaimSet, Role, Scope, ScopeRule};

/// Role gate: exact membership, no hierarchy.
pub fn role_allowed(claims: &ClaimSet, allowed: &BTreeSet<Role>) -> bool {
    allowed.contains(&claims.role)
}

/// Scope gate: admits when any listed scope's rule holds.
///
/// `claims.scopes` is never consulted; the scope names only pick which rule
/// to evaluate.
pub fn scope_allowed(claims: &ClaimSet, allowed: &BTreeSet<Scope>, path_identity: Option<&str>) -> bool {
    allowed.iter().any(|scope| match scope.rule() {
        ScopeRule::Owner => is_owner(claims, path_identity),
        ScopeRule::AdminRole => claims.is_admin(),
    })
}

/// Ownership gate: subject must equal the path identity byte for byte.
pub fn owner_allowed(claims: &ClaimSet, path_identity: Option<&str>) -> bool {
    is_owner(claims, path_identity)
}

fn is_owner(claims: &ClaimSet, path_identity: Option<&str>) -> bool {
    path_identity.is_some_and(|id| id == claims.subject)
}
