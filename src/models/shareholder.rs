// src/models/shareholder.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareholderGroup {
    Employee,
    Founder,
    Investor,
}

impl ShareholderGroup {
    // Ordem em que os grupos aparecem no gráfico do dashboard
    pub const ALL: [ShareholderGroup; 3] = [
        ShareholderGroup::Investor,
        ShareholderGroup::Founder,
        ShareholderGroup::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareholderGroup::Employee => "employee",
            ShareholderGroup::Founder => "founder",
            ShareholderGroup::Investor => "investor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Shareholder {
    #[schema(value_type = u32)]
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub group: ShareholderGroup,
    // IDs das concessões, na ordem de emissão
    #[serde(default)]
    #[schema(value_type = Vec<u32>)]
    pub grants: Vec<EntityId>,
}

impl Shareholder {
    pub fn new(id: EntityId, input: NewShareholder) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            group: input.group,
            grants: Vec::new(),
        }
    }
}

// Payload de criação (sem id e sem concessões)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewShareholder {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Grace Hopper")]
    pub name: String,

    pub group: ShareholderGroup,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditShareholderPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub group: ShareholderGroup,
}
