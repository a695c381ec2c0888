//! Authorization failure taxonomy.
//!
//! Every variant is terminal for the request and maps to exactly one HTTP
//! status and one user-visible message. Messages are fixed strings so nothing
//! about the token or the signing secret can leak through them.

use thiserror::Error;

/// Why a request was turned away.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AccessError {
    #[error("Authorization token missing")]
    CredentialMissing,

    /// Malformed, badly signed or expired. Deliberately not split further.
    #[error("Invalid or expired token")]
    CredentialInvalid,

    /// Claim context read before authentication attached anything.
    #[error("No claims found")]
    ClaimsAbsent,

    #[error("Role not permitted")]
    RoleDenied,

    #[error("Permission denied")]
    ScopeDenied,

    #[error("Permission denied")]
    OwnershipDenied,
}

impl AccessError {
    /// HTTP status code for this failure (401 or 403).
    pub fn http_status(&self) -> u16 {
        match self {
            AccessError::CredentialMissing
            | AccessError::CredentialInvalid
            | AccessError::ClaimsAbsent => 401,
            AccessError::RoleDenied | AccessError::ScopeDenied | AccessError::OwnershipDenied => 403,
        }
    }

    /// Stable snake_case identifier, suitable for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            AccessError::CredentialMissing => "credential_missing",
            AccessError::CredentialInvalid => "credential_invalid",
            AccessError::ClaimsAbsent => "claims_absent",
            AccessError::RoleDenied => "role_denied",
            AccessError::ScopeDenied => "scope_denied",
            AccessError::OwnershipDenied => "ownership_denied",
        }
    }
}

/// Outcome of a failed credential verification.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VerificationError {
    /// No header, no `Bearer ` prefix, or an empty token.
    #[error("credential missing")]
    Missing,

    /// Anything that fails after a token was presented.
    #[error("credential invalid")]
    Invalid,
}

impl From<VerificationError> for AccessError {
    fn from(value: VerificationError) -> Self {
        match value {
            VerificationError::Missing => AccessError::CredentialMissing,
            VerificationError::Invalid => AccessError::CredentialInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failures_are_401() {
        for e in [
            AccessError::CredentialMissing,
            AccessError::CredentialInvalid,
            AccessError::ClaimsAbsent,
        ] {
            assert_eq!(e.http_status(), 401, "{e:?}");
        }
    }

    #[test]
    fn gate_failures_are_403() {
        for e in [
            AccessError::RoleDenied,
            AccessError::ScopeDenied,
            AccessError::OwnershipDenied,
        ] {
            assert_eq!(e.http_status(), 403, "{e:?}");
        }
    }

    #[test]
    fn verification_errors_convert() {
        assert_eq!(
            AccessError::from(VerificationError::Missing),
            AccessError::CredentialMissing
        );
        assert_eq!(
            AccessError::from(VerificationError::Invalid),
            AccessError::CredentialInvalid
        );
        assert_eq!(
            AccessError::CredentialMissing.to_string(),
            "Authorization token missing"
        );
    }
}
