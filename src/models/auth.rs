// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::EntityId;

// Conta de usuário. Login é sem senha: o e-mail identifica a conta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "Ada Lovelace")]
    pub name: String,

    #[schema(example = "ada@fairshare.io")]
    pub email: String,

    // Vínculo opcional com o registro de acionista da pessoa
    #[serde(rename = "shareholderID", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<u32>)]
    pub shareholder_id: Option<EntityId>,
}

// Dados para criação de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}

// Dados para login (passwordless)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}

// Resposta de autenticação com o usuário e o token de sessão
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (e-mail do usuário)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued At
}
