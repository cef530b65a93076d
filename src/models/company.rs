// src/models/company.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

// Valor padrão por ação de cada classe
pub const DEFAULT_SHARE_VALUE: i64 = 100;
// Teto do valor por ação
pub const MAX_SHARE_VALUE: i64 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Company {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    #[schema(example = "Fair Share Inc.")]
    pub name: String,
}

// Valor monetário por ação, um campo para cada classe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyValue {
    #[schema(value_type = f64, example = 100.0)]
    pub common_value: Decimal,
    #[schema(value_type = f64, example = 100.0)]
    pub preferred_value: Decimal,
}

impl Default for CompanyValue {
    fn default() -> Self {
        Self {
            common_value: Decimal::from(DEFAULT_SHARE_VALUE),
            preferred_value: Decimal::from(DEFAULT_SHARE_VALUE),
        }
    }
}

impl CompanyValue {
    /// Aplica uma atualização parcial: campos ausentes ficam como estão.
    pub fn apply(&mut self, update: &UpdateValuePayload) {
        if let Some(common) = update.common_value {
            self.common_value = common;
        }
        if let Some(preferred) = update.preferred_value {
            self.preferred_value = preferred;
        }
    }
}

fn validate_share_value(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    if *val > Decimal::from(MAX_SHARE_VALUE) {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &MAX_SHARE_VALUE);
        err.message = Some("Valor por ação acima do limite.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuePayload {
    #[schema(value_type = Option<f64>, example = 200.0)]
    pub common_value: Option<Decimal>,

    #[schema(value_type = Option<f64>)]
    pub preferred_value: Option<Decimal>,
}

impl UpdateValuePayload {
    // Campos opcionais: só valida o que veio
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = [
            ("commonValue", self.common_value),
            ("preferredValue", self.preferred_value),
        ];
        for (field, value) in fields {
            if let Some(Err(e)) = value.as_ref().map(validate_share_value) {
                errors.add(field, e);
            }
        }

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }
}
