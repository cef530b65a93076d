// src/handlers/grants.rs

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        grant::{CreateGrantPayload, Grant},
        EntityId,
    },
};

// GET /api/grants
#[utoipa::path(
    get,
    path = "/api/grants",
    tag = "Grants",
    responses((status = 200, description = "Todas as concessões, por id", body = BTreeMap<u32, Grant>))
)]
pub async fn list_grants(
    State(app_state): State<AppState>,
) -> Result<Json<BTreeMap<EntityId, Grant>>, AppError> {
    Ok(Json(app_state.grant_repo.list().await?))
}

// POST /api/grant/new
#[utoipa::path(
    post,
    path = "/api/grant/new",
    tag = "Grants",
    request_body = CreateGrantPayload,
    responses(
        (status = 200, description = "Concessão emitida", body = Grant),
        (status = 400, description = "Dados ou data inválidos"),
        (status = 404, description = "Acionista não encontrado")
    )
)]
pub async fn create_grant(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateGrantPayload>,
) -> Result<Json<Grant>, AppError> {
    payload.validate()?;

    let grant = app_state
        .grant_repo
        .create(payload.shareholder_id, payload.grant)
        .await?;
    tracing::info!(
        "📈 Concessão {} emitida ({} ações {})",
        grant.id,
        grant.amount,
        grant.share_type.as_str()
    );
    Ok(Json(grant))
}
