//! Bearer credential verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::claims::{ClaimSet, validate_claims};
use crate::VerificationError;

/// Turns an `Authorization` header value into a verified [`ClaimSet`].
///
/// Implementations must be pure with respect to their inputs: the same header
/// and instant always give the same result.
pub trait CredentialVerifier: Send + Sync {
    fn verify_at(&self, raw_header: &str, now: DateTime<Utc>) -> Result<ClaimSet, VerificationError>;

    fn verify(&self, raw_header: &str) -> Result<ClaimSet, VerificationError> {
        self.verify_at(raw_header, Utc::now())
    }
}

/// Pull the token out of a `Bearer <token>` header value.
pub fn extract_bearer(raw_header: &str) -> Result<&str, VerificationError> {
    let token = raw_header
        .strip_prefix("Bearer ")
        .ok_or(VerificationError::Missing)?
        .trim();

    if token.is_empty() {
        return Err(VerificationError::Missing);
    }

    Ok(token)
}

/// HS256 verifier keyed by a process-wide shared secret.
#[derive(Clone)]
pub struct Hs256Verifier {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256Verifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_claims`.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256Verifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Verifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier for Hs256Verifier {
    fn verify_at(&self, raw_header: &str, now: DateTime<Utc>) -> Result<ClaimSet, VerificationError> {
        let token = extract_bearer(raw_header)?;

        let data = jsonwebtoken::decode::<ClaimSet>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(kind = ?e.kind(), "token rejected");
            VerificationError::Invalid
        })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
