// src/services/onboarding_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{Local, NaiveDate};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        auth::{CreateUserPayload, User},
        company::{Company, CompanyValue},
        dashboard::{ChartMode, ChartView, DashboardResponse},
        next_id,
        onboarding::{AddGrantPayload, OnboardingAction, OnboardingSession, OnboardingSnapshot, ACCOUNT_OWNER_ID},
        shareholder::{NewShareholder, Shareholder, ShareholderGroup},
    },
    services::equity_service,
};

/// Transição pura do wizard: devolve um novo snapshot, nunca altera `state`.
///
/// `today` é a data usada quando uma concessão chega sem `issued`.
/// Uma concessão para acionista inexistente devolve `ShareholderNotFound`.
pub fn signup_reducer(
    state: &OnboardingSnapshot,
    action: OnboardingAction,
    today: NaiveDate,
) -> Result<OnboardingSnapshot, AppError> {
    let mut next = state.clone();

    match action {
        OnboardingAction::UpdateUser(name) => {
            next.user_name = name.clone();
            match next.shareholders.get_mut(&ACCOUNT_OWNER_ID) {
                Some(owner) => owner.name = name,
                None => {
                    next.shareholders.insert(
                        ACCOUNT_OWNER_ID,
                        Shareholder {
                            id: ACCOUNT_OWNER_ID,
                            name,
                            email: None,
                            group: ShareholderGroup::Founder,
                            grants: Vec::new(),
                        },
                    );
                }
            }
        }
        OnboardingAction::UpdateEmail(email) => next.email = email,
        OnboardingAction::UpdateCompany(company) => next.company_name = company,
        OnboardingAction::AddShareholder(input) => {
            let id = next_id(&next.shareholders);
            next.shareholders.insert(id, Shareholder::new(id, input));
        }
        OnboardingAction::AddGrant(AddGrantPayload { shareholder_id, grant }) => {
            grant.validate()?;
            let owner = next
                .shareholders
                .get_mut(&shareholder_id)
                .ok_or(AppError::ShareholderNotFound(shareholder_id))?;
            let id = next_id(&next.grants);
            let grant = grant.into_grant(id, today)?;
            owner.grants.push(id);
            next.grants.insert(id, grant);
        }
    }

    Ok(next)
}

#[derive(Clone)]
pub struct OnboardingService {
    store: Store,
    sessions: Arc<RwLock<HashMap<Uuid, OnboardingSnapshot>>>,
}

impl OnboardingService {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn start(&self) -> OnboardingSession {
        let id = Uuid::new_v4();
        let snapshot = OnboardingSnapshot::default();
        self.sessions.write().await.insert(id, snapshot.clone());
        tracing::info!("📝 Onboarding {} iniciado", id);
        OnboardingSession { id, snapshot }
    }

    pub async fn get(&self, id: Uuid) -> Result<OnboardingSnapshot, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::OnboardingNotFound(id))
    }

    // Aplica uma ação; com erro o snapshot guardado continua o mesmo
    pub async fn dispatch(
        &self,
        id: Uuid,
        action: OnboardingAction,
    ) -> Result<OnboardingSnapshot, AppError> {
        let mut sessions = self.sessions.write().await;
        let current = sessions.get(&id).ok_or(AppError::OnboardingNotFound(id))?;

        let next = signup_reducer(current, action, Local::now().date_naive())?;
        sessions.insert(id, next.clone());
        Ok(next)
    }

    // Dashboard do cadastro em andamento, com os valores padrão por ação
    pub async fn preview_dashboard(
        &self,
        id: Uuid,
        mode: ChartMode,
        view: ChartView,
    ) -> Result<DashboardResponse, AppError> {
        let sessions = self.sessions.read().await;
        let snapshot = sessions.get(&id).ok_or(AppError::OnboardingNotFound(id))?;
        Ok(equity_service::dashboard(
            &snapshot.shareholders,
            &snapshot.grants,
            &CompanyValue::default(),
            mode,
            view,
        ))
    }

    /// Persiste o cadastro: usuário, empresa, acionistas e concessões, tudo numa
    /// transação do store. Só descarta a sessão se der certo.
    pub async fn finalize(&self, id: Uuid) -> Result<User, AppError> {
        let mut sessions = self.sessions.write().await;
        let snapshot = sessions.get(&id).ok_or(AppError::OnboardingNotFound(id))?;

        let user_payload = CreateUserPayload {
            email: snapshot.email.clone(),
            name: snapshot.user_name.clone(),
        };
        user_payload.validate()?;
        let company = Company { name: snapshot.company_name.clone() };
        company.validate()?;

        let user = self
            .store
            .transaction(|ledger| {
                ledger.insert_user(&user_payload.name, &user_payload.email)?;
                ledger.set_company(company);

                for draft in snapshot.shareholders.values() {
                    // O acionista 0 é quem está criando a conta
                    let email = if draft.id == ACCOUNT_OWNER_ID {
                        Some(user_payload.email.clone())
                    } else {
                        draft.email.clone()
                    };
                    let created = ledger.insert_shareholder(NewShareholder {
                        name: draft.name.clone(),
                        group: draft.group,
                        email,
                    })?;

                    for grant in draft.grants.iter().filter_map(|gid| snapshot.grants.get(gid)) {
                        ledger.adopt_grant(created.id, grant)?;
                    }
                }

                ledger
                    .users
                    .get(&user_payload.email)
                    .cloned()
                    .ok_or(AppError::UserNotFound)
            })
            .await?;

        let shareholder_count = snapshot.shareholders.len();
        sessions.remove(&id);
        tracing::info!(
            "✅ Onboarding {} finalizado para {} ({} acionistas)",
            id,
            user.email,
            shareholder_count
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grant::{NewGrant, ShareType};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    fn add_shareholder(name: &str, group: ShareholderGroup) -> OnboardingAction {
        OnboardingAction::AddShareholder(NewShareholder {
            name: name.to_string(),
            group,
            email: None,
        })
    }

    fn add_grant(shareholder_id: u32, amount: u64, issued: &str) -> OnboardingAction {
        OnboardingAction::AddGrant(AddGrantPayload {
            shareholder_id,
            grant: NewGrant {
                name: "Seed".to_string(),
                amount,
                issued: issued.to_string(),
                share_type: ShareType::Common,
            },
        })
    }

    fn run(actions: Vec<OnboardingAction>) -> OnboardingSnapshot {
        actions
            .into_iter()
            .fold(OnboardingSnapshot::default(), |state, action| {
                signup_reducer(&state, action, today()).unwrap()
            })
    }

    #[test]
    fn user_name_creates_then_renames_owner() {
        let state = run(vec![OnboardingAction::UpdateUser("Ada".into())]);
        let owner = &state.shareholders[&ACCOUNT_OWNER_ID];
        assert_eq!(owner.name, "Ada");
        assert_eq!(owner.group, ShareholderGroup::Founder);
        assert!(owner.grants.is_empty());

        let renamed = signup_reducer(&state, OnboardingAction::UpdateUser("Ada L.".into()), today()).unwrap();
        assert_eq!(renamed.user_name, "Ada L.");
        assert_eq!(renamed.shareholders[&ACCOUNT_OWNER_ID].name, "Ada L.");
        assert_eq!(renamed.shareholders.len(), 1);
        // o snapshot original continua intacto
        assert_eq!(state.user_name, "Ada");
    }

    #[test]
    fn email_and_company_touch_only_their_field() {
        let state = run(vec![
            OnboardingAction::UpdateEmail("ada@fs.io".into()),
            OnboardingAction::UpdateCompany("Fair Share".into()),
        ]);
        assert_eq!(state.email, "ada@fs.io");
        assert_eq!(state.company_name, "Fair Share");
        assert!(state.user_name.is_empty());
        assert!(state.shareholders.is_empty());
    }

    #[test]
    fn shareholder_ids_increase_from_one() {
        let state = run(vec![
            add_shareholder("Bob", ShareholderGroup::Investor),
            add_shareholder("Cid", ShareholderGroup::Employee),
            OnboardingAction::UpdateUser("Ada".into()),
            add_shareholder("Dee", ShareholderGroup::Investor),
        ]);
        let ids: Vec<u32> = state.shareholders.keys().copied().collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(state.shareholders[&3].name, "Dee");
    }

    #[test]
    fn grant_is_appended_once_at_the_end() {
        let state = run(vec![
            OnboardingAction::UpdateUser("Ada".into()),
            add_shareholder("Bob", ShareholderGroup::Investor),
            add_grant(1, 100, "2023-01-01"),
        ]);

        let next = signup_reducer(&state, add_grant(1, 50, ""), today()).unwrap();
        let before = &state.shareholders[&1].grants;
        let after = &next.shareholders[&1].grants;

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.last(), Some(&2));
        assert_eq!(after.iter().filter(|id| **id == 2).count(), 1);
        assert_eq!(next.grants[&2].issued, today());
        assert_eq!(next.grants[&1].issued, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn grant_for_unknown_shareholder_is_an_error() {
        let state = run(vec![OnboardingAction::UpdateUser("Ada".into())]);
        let result = signup_reducer(&state, add_grant(5, 10, ""), today());

        assert!(matches!(result, Err(AppError::ShareholderNotFound(5))));
        assert!(state.grants.is_empty());
    }

    #[test]
    fn grant_above_limit_is_rejected() {
        let state = run(vec![OnboardingAction::UpdateUser("Ada".into())]);
        let result = signup_reducer(&state, add_grant(ACCOUNT_OWNER_ID, u64::MAX, ""), today());

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(state.grants.is_empty());
    }

    async fn filled_session(service: &OnboardingService) -> Uuid {
        let session = service.start().await;
        for action in [
            OnboardingAction::UpdateUser("Ada".into()),
            OnboardingAction::UpdateEmail("ada@fs.io".into()),
            OnboardingAction::UpdateCompany("Fair Share".into()),
            add_shareholder("Bob", ShareholderGroup::Investor),
            add_grant(0, 1000, ""),
            add_grant(1, 300, "2023-06-01"),
            add_grant(0, 500, ""),
        ] {
            service.dispatch(session.id, action).await.unwrap();
        }
        session.id
    }

    #[tokio::test]
    async fn dispatch_error_keeps_held_snapshot() {
        let service = OnboardingService::new(Store::default());
        let id = filled_session(&service).await;
        let before = service.get(id).await.unwrap();

        assert!(service.dispatch(id, add_grant(9, 1, "")).await.is_err());
        assert_eq!(service.get(id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn preview_uses_default_share_values() {
        let service = OnboardingService::new(Store::default());
        let id = filled_session(&service).await;

        let board = service
            .preview_dashboard(id, ChartMode::Investor, ChartView::Value)
            .await
            .unwrap();
        assert_eq!(board.market_cap.total, Decimal::from(180_000));
        assert_eq!(board.series.len(), 2);
    }

    #[tokio::test]
    async fn finalize_fans_out_into_the_store() {
        let store = Store::default();
        let service = OnboardingService::new(store.clone());
        let id = filled_session(&service).await;

        let user = service.finalize(id).await.unwrap();
        assert_eq!(user.email, "ada@fs.io");
        assert_eq!(user.shareholder_id, Some(1));

        let ledger = store.snapshot().await;
        assert_eq!(ledger.company, Some(Company { name: "Fair Share".into() }));
        assert_eq!(ledger.shareholders.len(), 2);

        let ada = &ledger.shareholders[&1];
        assert_eq!(ada.email.as_deref(), Some("ada@fs.io"));
        let amounts: Vec<u64> = ada.grants.iter().map(|g| ledger.grants[g].amount).collect();
        assert_eq!(amounts, vec![1000, 500]);

        let bob = &ledger.shareholders[&2];
        assert_eq!(ledger.grants[&bob.grants[0]].amount, 300);

        // sessão consumida
        assert!(matches!(service.get(id).await, Err(AppError::OnboardingNotFound(_))));
    }

    #[tokio::test]
    async fn failed_finalize_writes_nothing() {
        let store = Store::default();
        store
            .transaction(|ledger| ledger.insert_user("Outra Ada", "ada@fs.io"))
            .await
            .unwrap();
        let service = OnboardingService::new(store.clone());
        let id = filled_session(&service).await;

        assert!(matches!(service.finalize(id).await, Err(AppError::EmailAlreadyExists)));

        let ledger = store.snapshot().await;
        assert!(ledger.company.is_none());
        assert!(ledger.shareholders.is_empty());
        assert!(ledger.grants.is_empty());
        assert!(service.get(id).await.is_ok());
    }

    #[tokio::test]
    async fn finalize_requires_user_and_company() {
        let service = OnboardingService::new(Store::default());
        let session = service.start().await;
        service
            .dispatch(session.id, OnboardingAction::UpdateUser("Ada".into()))
            .await
            .unwrap();

        assert!(matches!(
            service.finalize(session.id).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
