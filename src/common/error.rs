use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::EntityId;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Acionista {0} não encontrado")]
    ShareholderNotFound(EntityId),

    #[error("Usuário {0} já possui um acionista vinculado")]
    ShareholderAlreadyLinked(String),

    #[error("Cadastro {0} não encontrado")]
    OnboardingNotFound(Uuid),

    #[error("Data de emissão inválida: {0}")]
    InvalidDate(String),

    #[error("Validade do token fora do intervalo: {0} dias")]
    TokenTtlOutOfRange(i64),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string()),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail não cadastrado.".to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.".to_string()),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string()),
            AppError::ShareholderNotFound(id) => (StatusCode::NOT_FOUND, format!("Acionista {} não encontrado.", id)),
            AppError::ShareholderAlreadyLinked(email) => (
                StatusCode::BAD_REQUEST,
                format!("O usuário {} já possui um acionista vinculado.", email),
            ),
            AppError::OnboardingNotFound(id) => (StatusCode::NOT_FOUND, format!("Cadastro {} não encontrado.", id)),
            AppError::InvalidDate(raw) => (
                StatusCode::BAD_REQUEST,
                format!("Data de emissão inválida: '{}'. Use o formato AAAA-MM-DD.", raw),
            ),

            // Todos os outros erros viram 500, com o detalhe só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(AppError::EmailAlreadyExists.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidCredentials.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ShareholderNotFound(3).into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ShareholderAlreadyLinked("a@b.c".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::JwtError(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat.into())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::TokenTtlOutOfRange(i64::MAX).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
