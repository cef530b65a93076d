// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    grant::Grant,
    shareholder::{Shareholder, ShareholderGroup},
    EntityId,
};

// Recorte do gráfico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Investor,
    Group,
    Sharetype,
}

// Quantidade de ações ou valor monetário
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    Amount,
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub x: String,
    #[schema(value_type = f64)]
    pub y: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareholderTotals {
    pub grant_count: usize,
    pub total_shares: u64,
    pub common_grants: usize,
    pub common_shares: u64,
    pub preferred_grants: usize,
    pub preferred_shares: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketCap {
    #[schema(value_type = f64)]
    pub common: Decimal,
    #[schema(value_type = f64)]
    pub preferred: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

// Linha da tabela de acionistas
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareholderRow {
    #[schema(value_type = u32)]
    pub id: EntityId,
    pub name: String,
    pub group: ShareholderGroup,
    pub totals: ShareholderTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub mode: ChartMode,
    pub view: ChartView,
    pub market_cap: MarketCap,
    pub series: Vec<ChartPoint>,
    pub shareholders: Vec<ShareholderRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GrantLine {
    pub grant: Grant,
    #[schema(value_type = f64)]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ShareholderDetail {
    pub shareholder: Shareholder,
    pub totals: ShareholderTotals,
    pub grants: Vec<GrantLine>,
}
