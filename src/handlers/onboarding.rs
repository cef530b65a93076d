// src/handlers/onboarding.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::AuthResponse,
        dashboard::{ChartMode, ChartView, DashboardResponse},
        onboarding::{OnboardingAction, OnboardingSession, OnboardingSnapshot},
    },
};

// POST /api/onboarding
#[utoipa::path(
    post,
    path = "/api/onboarding",
    tag = "Onboarding",
    responses((status = 201, description = "Cadastro iniciado", body = OnboardingSession))
)]
pub async fn start_onboarding(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<OnboardingSession>) {
    let session = app_state.onboarding_service.start().await;
    (StatusCode::CREATED, Json(session))
}

// GET /api/onboarding/{id}
#[utoipa::path(
    get,
    path = "/api/onboarding/{id}",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID do cadastro")),
    responses(
        (status = 200, description = "Snapshot atual", body = OnboardingSnapshot),
        (status = 404, description = "Cadastro não encontrado")
    )
)]
pub async fn get_onboarding(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OnboardingSnapshot>, AppError> {
    Ok(Json(app_state.onboarding_service.get(id).await?))
}

// POST /api/onboarding/{id}/actions
#[utoipa::path(
    post,
    path = "/api/onboarding/{id}/actions",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID do cadastro")),
    request_body(
        content = serde_json::Value,
        description = "Ação do wizard: { \"type\": \"updateUser\" | \"updateEmail\" | \"updateCompany\" | \"addShareholder\" | \"addGrant\", \"payload\": ... }"
    ),
    responses(
        (status = 200, description = "Novo snapshot", body = OnboardingSnapshot),
        (status = 404, description = "Cadastro ou acionista não encontrado")
    )
)]
pub async fn dispatch_action(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<OnboardingAction>,
) -> Result<Json<OnboardingSnapshot>, AppError> {
    Ok(Json(app_state.onboarding_service.dispatch(id, action).await?))
}

// GET /api/onboarding/{id}/dashboard/{mode}/{view}
#[utoipa::path(
    get,
    path = "/api/onboarding/{id}/dashboard/{mode}/{view}",
    tag = "Onboarding",
    params(
        ("id" = Uuid, Path, description = "ID do cadastro"),
        ("mode" = ChartMode, Path, description = "investor | group | sharetype"),
        ("view" = ChartView, Path, description = "amount | value")
    ),
    responses(
        (status = 200, description = "Agregados do cadastro em andamento", body = DashboardResponse),
        (status = 404, description = "Cadastro não encontrado")
    )
)]
pub async fn preview_dashboard(
    State(app_state): State<AppState>,
    Path((id, mode, view)): Path<(Uuid, ChartMode, ChartView)>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(
        app_state
            .onboarding_service
            .preview_dashboard(id, mode, view)
            .await?,
    ))
}

// POST /api/onboarding/{id}/finalize
#[utoipa::path(
    post,
    path = "/api/onboarding/{id}/finalize",
    tag = "Onboarding",
    params(("id" = Uuid, Path, description = "ID do cadastro")),
    responses(
        (status = 200, description = "Dados persistidos; usuário já autenticado", body = AuthResponse),
        (status = 400, description = "Cadastro incompleto"),
        (status = 404, description = "Cadastro não encontrado"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn finalize_onboarding(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = app_state.onboarding_service.finalize(id).await?;
    let token = app_state.auth_service.create_token(&user.email)?;
    Ok(Json(AuthResponse { user, token }))
}
