// src/db/store.rs

use std::{collections::BTreeMap, path::Path, sync::Arc};

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::{
    common::error::AppError,
    models::{
        auth::User,
        company::{Company, CompanyValue, UpdateValuePayload},
        grant::{Grant, NewGrant},
        next_id,
        shareholder::{NewShareholder, Shareholder, ShareholderGroup},
        EntityId,
    },
};

// Todos os dados persistidos. É exatamente o que vai para o arquivo de snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub company: Option<Company>,
    // Indexado por e-mail
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    #[serde(default)]
    pub shareholders: BTreeMap<EntityId, Shareholder>,
    #[serde(default)]
    pub grants: BTreeMap<EntityId, Grant>,
    #[serde(default)]
    pub value: CompanyValue,
}

impl Ledger {
    pub fn insert_user(&mut self, name: &str, email: &str) -> Result<User, AppError> {
        if self.users.contains_key(email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let user = User {
            name: name.to_string(),
            email: email.to_string(),
            shareholder_id: None,
        };
        self.users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    pub fn set_company(&mut self, company: Company) -> Company {
        self.company = Some(company.clone());
        company
    }

    pub fn update_value(&mut self, update: &UpdateValuePayload) -> CompanyValue {
        self.value.apply(update);
        self.value
    }

    /// Cria o acionista. Se o e-mail pertence a um usuário, o usuário passa a
    /// apontar para ele; um usuário já vinculado é erro e nada é criado.
    pub fn insert_shareholder(&mut self, input: NewShareholder) -> Result<Shareholder, AppError> {
        if let Some(user) = input.email.as_deref().and_then(|email| self.users.get(email)) {
            if user.shareholder_id.is_some() {
                return Err(AppError::ShareholderAlreadyLinked(user.email.clone()));
            }
        }

        let shareholder = Shareholder::new(next_id(&self.shareholders), input);
        if let Some(user) = shareholder.email.as_deref().and_then(|email| self.users.get_mut(email)) {
            user.shareholder_id = Some(shareholder.id);
        }
        self.shareholders.insert(shareholder.id, shareholder.clone());
        Ok(shareholder)
    }

    pub fn update_shareholder(
        &mut self,
        id: EntityId,
        name: &str,
        group: ShareholderGroup,
    ) -> Result<Shareholder, AppError> {
        let shareholder = self
            .shareholders
            .get_mut(&id)
            .ok_or(AppError::ShareholderNotFound(id))?;
        shareholder.name = name.to_string();
        shareholder.group = group;
        Ok(shareholder.clone())
    }

    /// Emite uma concessão, opcionalmente para um acionista existente.
    pub fn insert_grant(
        &mut self,
        shareholder_id: Option<EntityId>,
        input: NewGrant,
        today: NaiveDate,
    ) -> Result<Grant, AppError> {
        self.push_grant(shareholder_id, |id| input.into_grant(id, today))
    }

    /// Regrava uma concessão já montada (ex.: vinda do onboarding) com um id novo.
    pub fn adopt_grant(&mut self, shareholder_id: EntityId, grant: &Grant) -> Result<Grant, AppError> {
        self.push_grant(Some(shareholder_id), |id| Ok(Grant { id, ..grant.clone() }))
    }

    fn push_grant<F>(&mut self, shareholder_id: Option<EntityId>, build: F) -> Result<Grant, AppError>
    where
        F: FnOnce(EntityId) -> Result<Grant, AppError>,
    {
        if let Some(id) = shareholder_id {
            if !self.shareholders.contains_key(&id) {
                return Err(AppError::ShareholderNotFound(id));
            }
        }

        let grant = build(next_id(&self.grants))?;
        self.grants.insert(grant.id, grant.clone());
        if let Some(shareholder) = shareholder_id.and_then(|id| self.shareholders.get_mut(&id)) {
            shareholder.grants.push(grant.id);
        }
        Ok(grant)
    }
}

// O "banco": um Ledger compartilhado. Criado no start, nunca global.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Ledger>>,
}

impl Store {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Carrega o snapshot do disco; arquivo ausente significa store vazio.
    pub async fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let ledger: Ledger = serde_json::from_slice(&bytes)
                    .with_context(|| format!("snapshot inválido em {}", path.display()))?;
                tracing::info!(
                    "📂 Snapshot carregado de {} ({} acionistas, {} concessões)",
                    path.display(),
                    ledger.shareholders.len(),
                    ledger.grants.len()
                );
                Ok(Self::new(ledger))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Nenhum snapshot em {}, iniciando vazio.", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("falha ao ler {}", path.display())),
        }
    }

    /// Grava o snapshot atual (arquivo temporário + rename).
    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        let ledger = self.snapshot().await;
        let bytes = serde_json::to_vec_pretty(&ledger)?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .with_context(|| format!("falha ao gravar {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("falha ao mover snapshot para {}", path.display()))?;
        Ok(())
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().await
    }

    pub async fn snapshot(&self) -> Ledger {
        self.inner.read().await.clone()
    }

    pub async fn reset(&self) {
        *self.inner.write().await = Ledger::default();
    }

    /// Executa `f` sobre uma cópia do Ledger e só publica o resultado se der certo.
    /// Com erro, nada muda.
    pub async fn transaction<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Ledger) -> Result<T, AppError>,
    {
        let mut guard = self.inner.write().await;
        let mut tx = guard.clone();
        let out = f(&mut tx)?;
        *guard = tx;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grant::ShareType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn new_grant(amount: u64) -> NewGrant {
        NewGrant {
            name: "Seed".to_string(),
            amount,
            issued: String::new(),
            share_type: ShareType::Common,
        }
    }

    #[test]
    fn shareholder_links_to_user_by_email() {
        let mut ledger = Ledger::default();
        ledger.insert_user("Ada", "ada@fs.io").unwrap();

        let shareholder = ledger
            .insert_shareholder(NewShareholder {
                name: "Ada".into(),
                group: ShareholderGroup::Founder,
                email: Some("ada@fs.io".into()),
            })
            .unwrap();

        assert_eq!(shareholder.id, 1);
        assert_eq!(ledger.users["ada@fs.io"].shareholder_id, Some(1));

        let again = ledger.insert_shareholder(NewShareholder {
            name: "Ada 2".into(),
            group: ShareholderGroup::Founder,
            email: Some("ada@fs.io".into()),
        });
        assert!(matches!(again, Err(AppError::ShareholderAlreadyLinked(_))));
        assert_eq!(ledger.shareholders.len(), 1);
    }

    #[test]
    fn grant_for_unknown_shareholder_creates_nothing() {
        let mut ledger = Ledger::default();
        let result = ledger.insert_grant(Some(9), new_grant(10), today());
        assert!(matches!(result, Err(AppError::ShareholderNotFound(9))));
        assert!(ledger.grants.is_empty());
    }

    #[test]
    fn grant_is_appended_to_shareholder() {
        let mut ledger = Ledger::default();
        let holder = ledger
            .insert_shareholder(NewShareholder {
                name: "Bob".into(),
                group: ShareholderGroup::Investor,
                email: None,
            })
            .unwrap();

        let first = ledger.insert_grant(Some(holder.id), new_grant(10), today()).unwrap();
        let orphan = ledger.insert_grant(None, new_grant(5), today()).unwrap();
        let second = ledger.insert_grant(Some(holder.id), new_grant(20), today()).unwrap();

        assert_eq!((first.id, orphan.id, second.id), (1, 2, 3));
        assert_eq!(ledger.shareholders[&holder.id].grants, vec![1, 3]);
        assert_eq!(first.issued, today());
    }

    #[tokio::test]
    async fn failed_transaction_leaves_store_untouched() {
        let store = Store::default();
        store
            .transaction(|ledger| ledger.insert_user("Ada", "ada@fs.io"))
            .await
            .unwrap();

        let result = store
            .transaction(|ledger| {
                ledger.set_company(Company { name: "Parcial".into() });
                ledger.insert_user("Ada", "ada@fs.io")
            })
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyExists)));
        assert!(store.read().await.company.is_none());
    }

    #[tokio::test]
    async fn snapshot_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        let store = Store::default();
        store
            .transaction(|ledger| {
                ledger.set_company(Company { name: "Fair Share".into() });
                ledger.update_value(&UpdateValuePayload {
                    common_value: Some(rust_decimal::Decimal::from(250)),
                    preferred_value: None,
                });
                Ok(())
            })
            .await
            .unwrap();
        store.save(&path).await.unwrap();

        let loaded = Store::load_or_default(&path).await.unwrap();
        assert_eq!(loaded.snapshot().await, store.snapshot().await);

        store.reset().await;
        assert_eq!(store.snapshot().await, Ledger::default());
    }

    #[tokio::test]
    async fn missing_snapshot_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::load_or_default(&dir.path().join("nada.json")).await.unwrap();
        assert_eq!(store.snapshot().await.value, CompanyValue::default());
    }
}
