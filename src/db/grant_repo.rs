// src/db/grant_repo.rs

use std::collections::BTreeMap;

use chrono::Local;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        grant::{Grant, NewGrant},
        EntityId,
    },
};

#[derive(Clone)]
pub struct GrantRepository {
    store: Store,
}

impl GrantRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<BTreeMap<EntityId, Grant>, AppError> {
        Ok(self.store.read().await.grants.clone())
    }

    // Emite a concessão; data vazia vira a data local de hoje
    pub async fn create(
        &self,
        shareholder_id: Option<EntityId>,
        input: NewGrant,
    ) -> Result<Grant, AppError> {
        let today = Local::now().date_naive();
        self.store
            .transaction(|ledger| ledger.insert_grant(shareholder_id, input, today))
            .await
    }
}
