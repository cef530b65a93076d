// src/services/equity_service.rs

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        company::CompanyValue,
        dashboard::{
            ChartMode, ChartPoint, ChartView, DashboardResponse, GrantLine, MarketCap,
            ShareholderDetail, ShareholderRow, ShareholderTotals,
        },
        grant::{Grant, ShareType},
        shareholder::{Shareholder, ShareholderGroup},
        EntityId,
    },
};

// ---
// Projeções puras sobre (acionistas, concessões, valor por ação).
// IDs de concessão que não existem no mapa são ignorados.
// As somas saturam em vez de estourar: um snapshot antigo pode trazer valores
// acima dos limites validados na entrada.
// ---

/// Valor monetário de uma concessão, pela classe da ação.
pub fn grant_value(grant: &Grant, value: &CompanyValue) -> Decimal {
    Decimal::from(grant.amount).saturating_mul(class_value(grant.share_type, value))
}

fn class_value(share_type: ShareType, value: &CompanyValue) -> Decimal {
    match share_type {
        ShareType::Common => value.common_value,
        ShareType::Preferred => value.preferred_value,
    }
}

// Multiplicador do gráfico: 1 por ação em "amount", valor da classe em "value"
fn multiplier(share_type: ShareType, value: &CompanyValue, view: ChartView) -> Decimal {
    match view {
        ChartView::Amount => Decimal::ONE,
        ChartView::Value => class_value(share_type, value),
    }
}

pub fn shareholder_totals(
    shareholder: &Shareholder,
    grants: &BTreeMap<EntityId, Grant>,
) -> ShareholderTotals {
    shareholder
        .grants
        .iter()
        .filter_map(|id| grants.get(id))
        .fold(ShareholderTotals::default(), |mut acc, grant| {
            acc.grant_count += 1;
            acc.total_shares = acc.total_shares.saturating_add(grant.amount);
            match grant.share_type {
                ShareType::Common => {
                    acc.common_grants += 1;
                    acc.common_shares = acc.common_shares.saturating_add(grant.amount);
                }
                ShareType::Preferred => {
                    acc.preferred_grants += 1;
                    acc.preferred_shares = acc.preferred_shares.saturating_add(grant.amount);
                }
            }
            acc
        })
}

/// Market cap: soma do valor de todas as concessões, separada por classe.
pub fn market_cap(grants: &BTreeMap<EntityId, Grant>, value: &CompanyValue) -> MarketCap {
    let class_total = |share_type: ShareType| -> Decimal {
        grants
            .values()
            .filter(|g| g.share_type == share_type)
            .map(|g| grant_value(g, value))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    };

    let common = class_total(ShareType::Common);
    let preferred = class_total(ShareType::Preferred);
    MarketCap {
        common,
        preferred,
        total: common.saturating_add(preferred),
    }
}

fn weighted_total<'a>(
    grant_ids: impl Iterator<Item = &'a EntityId>,
    grants: &BTreeMap<EntityId, Grant>,
    value: &CompanyValue,
    view: ChartView,
) -> Decimal {
    grant_ids
        .filter_map(|id| grants.get(id))
        .map(|g| Decimal::from(g.amount).saturating_mul(multiplier(g.share_type, value, view)))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Série do gráfico de pizza para o recorte pedido.
pub fn chart_series(
    shareholders: &BTreeMap<EntityId, Shareholder>,
    grants: &BTreeMap<EntityId, Grant>,
    value: &CompanyValue,
    mode: ChartMode,
    view: ChartView,
) -> Vec<ChartPoint> {
    match mode {
        // Um ponto por acionista; quem não tem nada fica de fora
        ChartMode::Investor => shareholders
            .values()
            .map(|s| ChartPoint {
                x: s.name.clone(),
                y: weighted_total(s.grants.iter(), grants, value, view),
            })
            .filter(|p| p.y > Decimal::ZERO)
            .collect(),

        // Sempre os três grupos, mesmo zerados
        ChartMode::Group => ShareholderGroup::ALL
            .iter()
            .map(|group| ChartPoint {
                x: group.as_str().to_string(),
                y: weighted_total(
                    shareholders
                        .values()
                        .filter(|s| s.group == *group)
                        .flat_map(|s| s.grants.iter()),
                    grants,
                    value,
                    view,
                ),
            })
            .collect(),

        // Sempre as duas classes
        ChartMode::Sharetype => ShareType::ALL
            .iter()
            .map(|share_type| ChartPoint {
                x: share_type.as_str().to_string(),
                y: weighted_total(
                    shareholders
                        .values()
                        .flat_map(|s| s.grants.iter())
                        .filter(|id| grants.get(*id).is_some_and(|g| g.share_type == *share_type)),
                    grants,
                    value,
                    view,
                ),
            })
            .collect(),
    }
}

pub fn shareholder_rows(
    shareholders: &BTreeMap<EntityId, Shareholder>,
    grants: &BTreeMap<EntityId, Grant>,
) -> Vec<ShareholderRow> {
    shareholders
        .values()
        .map(|s| ShareholderRow {
            id: s.id,
            name: s.name.clone(),
            group: s.group,
            totals: shareholder_totals(s, grants),
        })
        .collect()
}

pub fn dashboard(
    shareholders: &BTreeMap<EntityId, Shareholder>,
    grants: &BTreeMap<EntityId, Grant>,
    value: &CompanyValue,
    mode: ChartMode,
    view: ChartView,
) -> DashboardResponse {
    DashboardResponse {
        mode,
        view,
        market_cap: market_cap(grants, value),
        series: chart_series(shareholders, grants, value, mode, view),
        shareholders: shareholder_rows(shareholders, grants),
    }
}

pub fn shareholder_detail(
    shareholder: &Shareholder,
    grants: &BTreeMap<EntityId, Grant>,
    value: &CompanyValue,
) -> ShareholderDetail {
    let lines = shareholder
        .grants
        .iter()
        .filter_map(|id| grants.get(id))
        .map(|g| GrantLine {
            grant: g.clone(),
            value: grant_value(g, value),
        })
        .collect();

    ShareholderDetail {
        shareholder: shareholder.clone(),
        totals: shareholder_totals(shareholder, grants),
        grants: lines,
    }
}

// ---
// Serviço: aplica as projeções sobre o store persistido
// ---

#[derive(Clone)]
pub struct EquityService {
    store: Store,
}

impl EquityService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn get_dashboard(
        &self,
        mode: ChartMode,
        view: ChartView,
    ) -> Result<DashboardResponse, AppError> {
        // Uma única leitura: acionistas, concessões e valores do mesmo instante
        let ledger = self.store.read().await;
        Ok(dashboard(&ledger.shareholders, &ledger.grants, &ledger.value, mode, view))
    }

    pub async fn get_shareholder_detail(&self, id: EntityId) -> Result<ShareholderDetail, AppError> {
        let ledger = self.store.read().await;
        let shareholder = ledger
            .shareholders
            .get(&id)
            .ok_or(AppError::ShareholderNotFound(id))?;
        Ok(shareholder_detail(shareholder, &ledger.grants, &ledger.value))
    }
}
