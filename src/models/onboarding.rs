// src/models/onboarding.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    grant::{Grant, NewGrant},
    shareholder::{NewShareholder, Shareholder},
    EntityId,
};

// Acionista reservado para quem está criando a conta
pub const ACCOUNT_OWNER_ID: EntityId = 0;

// Dados do cadastro em andamento. Só vira entidade persistida no finalize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSnapshot {
    pub user_name: String,
    pub email: String,
    pub company_name: String,
    #[schema(value_type = BTreeMap<u32, Shareholder>)]
    pub shareholders: BTreeMap<EntityId, Shareholder>,
    #[schema(value_type = BTreeMap<u32, Grant>)]
    pub grants: BTreeMap<EntityId, Grant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddGrantPayload {
    #[serde(rename = "shareholderID")]
    pub shareholder_id: EntityId,
    pub grant: NewGrant,
}

// Ações do wizard, no formato `{ "type": ..., "payload": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum OnboardingAction {
    UpdateUser(String),
    UpdateEmail(String),
    UpdateCompany(String),
    AddShareholder(NewShareholder),
    AddGrant(AddGrantPayload),
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSession {
    pub id: Uuid,
    pub snapshot: OnboardingSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{grant::ShareType, shareholder::ShareholderGroup};

    #[test]
    fn actions_use_type_and_payload_tags() {
        let action: OnboardingAction =
            serde_json::from_str(r#"{"type": "updateUser", "payload": "Ada"}"#).unwrap();
        assert_eq!(action, OnboardingAction::UpdateUser("Ada".to_string()));

        let action: OnboardingAction = serde_json::from_str(
            r#"{"type": "addShareholder", "payload": {"name": "Bob", "group": "investor"}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            OnboardingAction::AddShareholder(NewShareholder {
                name: "Bob".to_string(),
                group: ShareholderGroup::Investor,
                email: None,
            })
        );

        let action: OnboardingAction = serde_json::from_str(
            r#"{"type": "addGrant", "payload": {"shareholderID": 1, "grant": {"name": "Seed", "amount": 100, "issued": "", "type": "common"}}}"#,
        )
        .unwrap();
        match action {
            OnboardingAction::AddGrant(payload) => {
                assert_eq!(payload.shareholder_id, 1);
                assert_eq!(payload.grant.share_type, ShareType::Common);
            }
            other => panic!("ação inesperada: {:?}", other),
        }
    }
}
