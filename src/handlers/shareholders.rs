// src/handlers/shareholders.rs

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        dashboard::ShareholderDetail,
        shareholder::{EditShareholderPayload, NewShareholder, Shareholder},
        EntityId,
    },
};

// GET /api/shareholders
#[utoipa::path(
    get,
    path = "/api/shareholders",
    tag = "Shareholders",
    responses((status = 200, description = "Todos os acionistas, por id", body = BTreeMap<u32, Shareholder>))
)]
pub async fn list_shareholders(
    State(app_state): State<AppState>,
) -> Result<Json<BTreeMap<EntityId, Shareholder>>, AppError> {
    Ok(Json(app_state.shareholder_repo.list().await?))
}

// POST /api/shareholder/new
#[utoipa::path(
    post,
    path = "/api/shareholder/new",
    tag = "Shareholders",
    request_body = NewShareholder,
    responses(
        (status = 200, description = "Acionista criado", body = Shareholder),
        (status = 400, description = "Dados inválidos ou usuário já vinculado")
    )
)]
pub async fn create_shareholder(
    State(app_state): State<AppState>,
    Json(payload): Json<NewShareholder>,
) -> Result<Json<Shareholder>, AppError> {
    payload.validate()?;

    let shareholder = app_state.shareholder_repo.create(payload).await?;
    tracing::info!("🧑‍💼 Acionista {} criado: {}", shareholder.id, shareholder.name);
    Ok(Json(shareholder))
}

// POST /api/shareholder/{id}/edit
#[utoipa::path(
    post,
    path = "/api/shareholder/{id}/edit",
    tag = "Shareholders",
    request_body = EditShareholderPayload,
    params(("id" = u32, Path, description = "ID do acionista")),
    responses(
        (status = 200, description = "Acionista atualizado", body = Shareholder),
        (status = 404, description = "Acionista não encontrado")
    )
)]
pub async fn edit_shareholder(
    State(app_state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(payload): Json<EditShareholderPayload>,
) -> Result<Json<Shareholder>, AppError> {
    payload.validate()?;

    let shareholder = app_state
        .shareholder_repo
        .update(id, &payload.name, payload.group)
        .await?;
    Ok(Json(shareholder))
}

// GET /api/shareholder/{id}
#[utoipa::path(
    get,
    path = "/api/shareholder/{id}",
    tag = "Shareholders",
    params(("id" = u32, Path, description = "ID do acionista")),
    responses(
        (status = 200, description = "Acionista, totais e concessões com valor", body = ShareholderDetail),
        (status = 404, description = "Acionista não encontrado")
    )
)]
pub async fn get_shareholder(
    State(app_state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Json<ShareholderDetail>, AppError> {
    Ok(Json(app_state.equity_service.get_shareholder_detail(id).await?))
}
