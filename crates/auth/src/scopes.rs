use serde::{Deserialize, Serialize};

/// Named permission scope.
///
/// A scope name does not act as a flag the client holds; it selects the rule
/// the scope gate evaluates (see [`ScopeRule`]). Names ending in `:self` select
/// the ownership rule and names starting with `admin:` select the admin-role
/// rule. Read and write variants share a rule and differ only in which routes
/// list them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "user:read:self")]
    UserReadSelf,
    #[serde(rename = "user:write:self")]
    UserWriteSelf,
    #[serde(rename = "admin:read:all")]
    AdminReadAll,
    #[serde(rename = "admin:write:all")]
    AdminWriteAll,
}

/// Predicate a scope name selects.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScopeRule {
    /// Caller's subject must equal the request's identity path parameter.
    Owner,
    /// Caller must hold the admin role.
    AdminRole,
}

impl Scope {
    pub const ALL: [Scope; 4] = [
        Scope::UserReadSelf,
        Scope::UserWriteSelf,
        Scope::AdminReadAll,
        Scope::AdminWriteAll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::UserReadSelf => "user:read:self",
            Scope::UserWriteSelf => "user:write:self",
            Scope::AdminReadAll => "admin:read:all",
            Scope::AdminWriteAll => "admin:write:all",
        }
    }

    pub fn rule(&self) -> ScopeRule {
        match self {
            Scope::UserReadSelf | Scope::UserWriteSelf => ScopeRule::Owner,
            Scope::AdminReadAll | Scope::AdminWriteAll => ScopeRule::AdminRole,
        }
    }
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
