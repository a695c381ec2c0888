//! Process configuration read from the environment at startup.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;

/// Secret used when `JWT_SECRET` is unset. Never acceptable outside dev.
pub const DEV_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub jwt_secret: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        let port = match lookup("PORT").filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { jwt_secret, port })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl core::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("jwt_secret", &"<redacted>")
            .field("port", &self.port)
            .finish()
    }
}
