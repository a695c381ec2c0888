//! Resources served behind the authorization layer.
//!
//! Accounts and profiles are keyed by the identity of the user that owns
//! them, which is what `:id` in `/accounts/:id` and `/profiles/:id` refers
//! to. Transactions carry their own id and name their owner in `user_id`.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub user_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    /// Signed amount in minor currency units.
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
}
