// src/db/shareholder_repo.rs

use std::collections::BTreeMap;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        shareholder::{NewShareholder, Shareholder, ShareholderGroup},
        EntityId,
    },
};

#[derive(Clone)]
pub struct ShareholderRepository {
    store: Store,
}

impl ShareholderRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<BTreeMap<EntityId, Shareholder>, AppError> {
        Ok(self.store.read().await.shareholders.clone())
    }

    // Cria o acionista e, se o e-mail for de um usuário, faz o vínculo na mesma transação
    pub async fn create(&self, input: NewShareholder) -> Result<Shareholder, AppError> {
        self.store
            .transaction(|ledger| ledger.insert_shareholder(input))
            .await
    }

    pub async fn update(
        &self,
        id: EntityId,
        name: &str,
        group: ShareholderGroup,
    ) -> Result<Shareholder, AppError> {
        self.store
            .transaction(|ledger| ledger.update_shareholder(id, name, group))
            .await
    }
}
