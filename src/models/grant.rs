// src/models/grant.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, models::EntityId};

// Classe da ação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    Common,
    Preferred,
}

impl ShareType {
    pub const ALL: [ShareType; 2] = [ShareType::Common, ShareType::Preferred];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareType::Common => "common",
            ShareType::Preferred => "preferred",
        }
    }
}

// Uma emissão de ações para um acionista
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Grant {
    #[schema(value_type = u32)]
    pub id: EntityId,
    #[schema(example = "Seed round")]
    pub name: String,
    pub amount: u64,
    #[schema(value_type = String, example = "2024-01-31")]
    pub issued: NaiveDate,
    #[serde(rename = "type")]
    pub share_type: ShareType,
}

// Concessão ainda sem id. `issued` pode vir vazio: nesse caso vale a data de hoje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewGrant {
    #[validate(length(min = 1, message = "O nome da concessão é obrigatório."))]
    pub name: String,
    // Teto de 10^12 ações: com o teto de valor por ação, os produtos cabem num Decimal
    #[validate(range(max = 1_000_000_000_000u64, message = "Quantidade de ações acima do limite."))]
    pub amount: u64,
    #[serde(default)]
    #[schema(example = "2024-01-31")]
    pub issued: String,
    #[serde(rename = "type")]
    pub share_type: ShareType,
}

impl NewGrant {
    /// Resolve a data de emissão: vazia vira `today`; aceita `YYYY-MM-DD`
    /// ou um timestamp RFC 3339 (apenas a data é mantida).
    pub fn issued_on(&self, today: NaiveDate) -> Result<NaiveDate, AppError> {
        let raw = self.issued.trim();
        if raw.is_empty() {
            return Ok(today);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(date);
        }
        chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .map_err(|_| AppError::InvalidDate(raw.to_string()))
    }

    pub fn into_grant(self, id: EntityId, today: NaiveDate) -> Result<Grant, AppError> {
        let issued = self.issued_on(today)?;
        Ok(Grant {
            id,
            name: self.name,
            amount: self.amount,
            issued,
            share_type: self.share_type,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGrantPayload {
    #[serde(rename = "shareholderID", default)]
    #[schema(value_type = Option<u32>)]
    pub shareholder_id: Option<EntityId>,
    #[validate(nested)]
    pub grant: NewGrant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(issued: &str) -> NewGrant {
        NewGrant {
            name: "Seed".to_string(),
            amount: 10,
            issued: issued.to_string(),
            share_type: ShareType::Common,
        }
    }

    #[test]
    fn empty_issued_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let grant = draft("").into_grant(1, today).unwrap();
        assert_eq!(grant.issued, today);
        assert_eq!(serde_json::to_value(&grant).unwrap()["issued"], "2024-03-09");
    }

    #[test]
    fn timestamp_is_truncated_to_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let issued = draft("2023-12-01T10:00:00Z").issued_on(today).unwrap();
        assert_eq!(issued, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
    }

    #[test]
    fn garbage_date_is_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert!(matches!(
            draft("yesterday").issued_on(today),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn amount_above_limit_is_rejected() {
        let mut grant = draft("");
        grant.amount = 1_000_000_000_000;
        assert!(grant.validate().is_ok());

        grant.amount = u64::MAX;
        assert!(grant.validate().is_err());
    }

    #[test]
    fn grant_uses_type_on_the_wire() {
        let payload: CreateGrantPayload = serde_json::from_str(
            r#"{"shareholderID": 2, "grant": {"name": "A", "amount": 5, "issued": "", "type": "preferred"}}"#,
        )
        .unwrap();
        assert_eq!(payload.shareholder_id, Some(2));
        assert_eq!(payload.grant.share_type, ShareType::Preferred);
    }
}
