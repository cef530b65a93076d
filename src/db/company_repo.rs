// src/db/company_repo.rs

use crate::{
    common::error::AppError,
    db::Store,
    models::company::{Company, CompanyValue, UpdateValuePayload},
};

#[derive(Clone)]
pub struct CompanyRepository {
    store: Store,
}

impl CompanyRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn get_company(&self) -> Result<Option<Company>, AppError> {
        Ok(self.store.read().await.company.clone())
    }

    // Substitui a empresa anterior, se houver
    pub async fn set_company(&self, company: Company) -> Result<Company, AppError> {
        self.store
            .transaction(|ledger| Ok(ledger.set_company(company)))
            .await
    }

    pub async fn get_value(&self) -> Result<CompanyValue, AppError> {
        Ok(self.store.read().await.value)
    }

    pub async fn update_value(&self, update: &UpdateValuePayload) -> Result<CompanyValue, AppError> {
        self.store
            .transaction(|ledger| Ok(ledger.update_value(update)))
            .await
    }
}
