// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, CreateUserPayload, SignInPayload, User},
};

// POST /api/signin
#[utoipa::path(
    post,
    path = "/api/signin",
    tag = "Auth",
    request_body = SignInPayload,
    responses(
        (status = 200, description = "Usuário e token de sessão", body = AuthResponse),
        (status = 401, description = "E-mail não cadastrado")
    )
)]
pub async fn sign_in(
    State(app_state): State<AppState>,
    Json(payload): Json<SignInPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (user, token) = app_state.auth_service.sign_in(&payload.email).await?;
    Ok(Json(AuthResponse { user, token }))
}

// POST /api/user/new
#[utoipa::path(
    post,
    path = "/api/user/new",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    let user = app_state
        .user_repo
        .create_user(&payload.name, &payload.email)
        .await
        .inspect_err(|e| {
            if matches!(e, AppError::EmailAlreadyExists) {
                tracing::warn!("Usuário {} já existe", payload.email);
            }
        })?;

    tracing::info!("👤 Usuário criado: {}", user.email);
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário do token", body = User),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
