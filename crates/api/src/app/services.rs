//! Service wiring: the stores handlers are given.

use std::sync::Arc;

use chrono::Utc;

use crate::app::models::{Account, Profile, Transaction};
use crate::app::store::{InMemoryStore, ResourceStore};

pub struct AppServices {
    pub accounts: Arc<dyn ResourceStore<Account>>,
    pub profiles: Arc<dyn ResourceStore<Profile>>,
    pub transactions: Arc<dyn ResourceStore<Transaction>>,
}

impl AppServices {
    pub fn new(
        accounts: Arc<dyn ResourceStore<Account>>,
        profiles: Arc<dyn ResourceStore<Profile>>,
        transactions: Arc<dyn ResourceStore<Transaction>>,
    ) -> Self {
        Self {
            accounts,
            profiles,
            transactions,
        }
    }

    /// In-memory stores seeded with users `1` and `2`, plus one transaction
    /// each (`tx1`, `tx2`).
    pub fn in_memory() -> Self {
        let now = Utc::now();

        let accounts = ["1", "2"].map(|id| {
            (
                id.to_string(),
                Account {
                    user_id: id.to_string(),
                    name: format!("Account {id}"),
                    created_at: now,
                },
            )
        });
        let profiles = ["1", "2"].map(|id| {
            (
                id.to_string(),
                Profile {
                    user_id: id.to_string(),
                    display_name: format!("Profile {id}"),
                    created_at: now,
                },
            )
        });
        let transactions = [("tx1", "1", 10_000), ("tx2", "2", 5_000)].map(|(id, owner, amount_cents)| {
            (
                id.to_string(),
                Transaction {
                    id: id.to_string(),
                    user_id: owner.to_string(),
                    amount_cents,
                    created_at: now,
                },
            )
        });

        Self::new(
            Arc::new(InMemoryStore::seeded(accounts)),
            Arc::new(InMemoryStore::seeded(profiles)),
            Arc::new(InMemoryStore::seeded(transactions)),
        )
    }
}
