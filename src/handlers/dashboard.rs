// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{ChartMode, ChartView, DashboardResponse},
};

// GET /api/dashboard/{mode}/{view}
#[utoipa::path(
    get,
    path = "/api/dashboard/{mode}/{view}",
    tag = "Dashboard",
    params(
        ("mode" = ChartMode, Path, description = "investor | group | sharetype"),
        ("view" = ChartView, Path, description = "amount | value")
    ),
    responses(
        (status = 200, description = "Market cap, série do gráfico e tabela de acionistas", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Path((mode, view)): Path<(ChartMode, ChartView)>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(app_state.equity_service.get_dashboard(mode, view).await?))
}
