use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Role, VerificationError};

/// Verified identity payload of a bearer token.
///
/// A `ClaimSet` is only ever produced by a successful verification; there is
/// no `Default`, so code that needs one must branch on its presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Caller identity. Older tokens carry it as `user_id`. A payload must
    /// use exactly one of the two keys; carrying both fails to decode.
    #[serde(rename = "sub", alias = "user_id")]
    pub subject: String,

    pub role: Role,

    /// Scopes the issuer listed. Informational only: gates never test
    /// membership in this set. Absent and `null` both read as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scopes: BTreeSet<String>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expiry: DateTime<Utc>,
}

impl ClaimSet {
    pub fn new(subject: impl Into<String>, role: Role, expiry: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            role,
            scopes: BTreeSet::new(),
            expiry,
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeSet<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validate decoded claims against the evaluation instant.
///
/// The token is live only while `now` is strictly before `expiry`. A blank
/// subject is treated like any other malformed token.
pub fn validate_claims(claims: &ClaimSet, now: DateTime<Utc>) -> Result<(), VerificationError> {
    if claims.subject.trim().is_empty() {
        return Err(VerificationError::Invalid);
    }
    if now >= claims.expiry {
        return Err(VerificationError::Invalid);
    }
    Ok(())
}
