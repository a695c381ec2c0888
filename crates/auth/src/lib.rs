//! Request-authorization core for `gatehouse`.
//!
//! This crate is intentionally decoupled from HTTP and storage: it verifies
//! bearer credentials and evaluates per-route policies, nothing more.

pub mod claims;
pub mod error;
pub mod gates;
pub mod policy;
pub mod roles;
pub mod scopes;
pub mod verify;

pub use claims::{ClaimSet, validate_claims};
pub use error::{AccessError, VerificationError};
pub use policy::{AccessDecision, Denial, PathParams, RouteConfig, Stage, evaluate};
pub use roles::Role;
pub use scopes::{Scope, ScopeRule};
pub use verify::{CredentialVerifier, Hs256Verifier, extract_bearer};
