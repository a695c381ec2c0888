use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::gates::{owner_allowed, role_allowed, scope_allowed};
use crate::{AccessError, ClaimSet, Role, Scope};

/// Path parameters matched by the router for the current request.
pub type PathParams = HashMap<String, String>;

/// Static access policy attached to a route at registration time.
///
/// Each gate is optional; an unset gate is skipped. A gate configured with an
/// empty allow-list admits nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    roles: Option<BTreeSet<Role>>,
    scopes: Option<BTreeSet<Scope>>,
    scope_param: Cow<'static, str>,
    owner_param: Option<Cow<'static, str>>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            roles: None,
            scopes: None,
            scope_param: Cow::Borrowed("id"),
            owner_param: None,
        }
    }
}

impl RouteConfig {
    /// Policy that only requires a verified claim set.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    pub fn scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes = Some(scopes.into_iter().collect());
        self
    }

    /// Path parameter that `:self` scopes compare against (default `id`).
    pub fn scope_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.scope_param = name.into();
        self
    }

    /// Path parameter that must equal the caller's subject.
    pub fn owner_param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.owner_param = Some(name.into());
        self
    }

    pub fn allowed_roles(&self) -> Option<&BTreeSet<Role>> {
        self.roles.as_ref()
    }

    pub fn allowed_scopes(&self) -> Option<&BTreeSet<Scope>> {
        self.scopes.as_ref()
    }

    pub fn scope_param_name(&self) -> &str {
        &self.scope_param
    }

    pub fn owner_param_name(&self) -> Option<&str> {
        self.owner_param.as_deref()
    }
}

/// The check that produced a denial, in evaluation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Authentication,
    Role,
    Scope,
    Ownership,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Denial {
    pub stage: Stage,
    pub reason: AccessError,
}

impl Denial {
    fn at(stage: Stage, reason: AccessError) -> Self {
        Self { stage, reason }
    }

    pub fn http_status(&self) -> u16 {
        self.reason.http_status()
    }
}

/// Result of running a route's policy against one request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Admit,
    Deny(Denial),
}

impl AccessDecision {
    pub fn is_admit(&self) -> bool {
        matches!(self, AccessDecision::Admit)
    }
}

/// Run the gates configured on `route` in fixed order.
///
/// Order: claim presence, role, scope, ownership. The first failure decides
/// the outcome and nothing after it runs.
///
/// - No IO
/// - No panics
/// - Same inputs, same decision
pub fn evaluate(route: &RouteConfig, claims: Option<&ClaimSet>, params: &PathParams) -> AccessDecision {
    let Some(claims) = claims else {
        return AccessDecision::Deny(Denial::at(Stage::Authentication, AccessError::ClaimsAbsent));
    };

    if let Some(roles) = route.allowed_roles() {
        if !role_allowed(claims, roles) {
            return AccessDecision::Deny(Denial::at(Stage::Role, AccessError::RoleDenied));
        }
    }

    if let Some(scopes) = route.allowed_scopes() {
        let identity = params.get(route.scope_param_name()).map(String::as_str);
        if !scope_allowed(claims, scopes, identity) {
            return AccessDecision::Deny(Denial::at(Stage::Scope, AccessError::ScopeDenied));
        }
    }

    if let Some(param) = route.owner_param_name() {
        let identity = params.get(param).map(String::as_str);
        if !owner_allowed(claims, identity) {
            return AccessDecision::Deny(Denial::at(Stage::Ownership, AccessError::OwnershipDenied));
        }
    }

    AccessDecision::Admit
}
