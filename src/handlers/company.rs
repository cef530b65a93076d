// src/handlers/company.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::company::{Company, CompanyValue, UpdateValuePayload},
};

// GET /api/company
#[utoipa::path(
    get,
    path = "/api/company",
    tag = "Company",
    responses((status = 200, description = "Empresa atual (null antes do onboarding)", body = Option<Company>))
)]
pub async fn get_company(State(app_state): State<AppState>) -> Result<Json<Option<Company>>, AppError> {
    Ok(Json(app_state.company_repo.get_company().await?))
}

// POST /api/company/new
#[utoipa::path(
    post,
    path = "/api/company/new",
    tag = "Company",
    request_body = Company,
    responses(
        (status = 200, description = "Empresa criada (substitui a anterior)", body = Company),
        (status = 400, description = "Nome vazio")
    )
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    Json(payload): Json<Company>,
) -> Result<Json<Company>, AppError> {
    payload.validate()?;

    let company = app_state.company_repo.set_company(payload).await?;
    tracing::info!("🏢 Empresa definida: {}", company.name);
    Ok(Json(company))
}

// GET /api/value
#[utoipa::path(
    get,
    path = "/api/value",
    tag = "Company",
    responses((status = 200, description = "Valor por ação de cada classe", body = CompanyValue))
)]
pub async fn get_value(State(app_state): State<AppState>) -> Result<Json<CompanyValue>, AppError> {
    Ok(Json(app_state.company_repo.get_value().await?))
}

// POST /api/value/new
#[utoipa::path(
    post,
    path = "/api/value/new",
    tag = "Company",
    request_body = UpdateValuePayload,
    responses(
        (status = 200, description = "Valores atualizados; campos ausentes não mudam", body = CompanyValue),
        (status = 400, description = "Valor negativo")
    )
)]
pub async fn update_value(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateValuePayload>,
) -> Result<Json<CompanyValue>, AppError> {
    payload.validate()?;

    let value = app_state.company_repo.update_value(&payload).await?;
    tracing::info!(
        "💲 Valor por ação: common={} preferred={}",
        value.common_value,
        value.preferred_value
    );
    Ok(Json(value))
}
