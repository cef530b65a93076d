// src/services/auth.rs

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    token_ttl_days: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, token_ttl_days: i64) -> Self {
        Self { user_repo, jwt_secret, token_ttl_days }
    }

    // Login sem senha: basta o e-mail existir
    pub async fn sign_in(&self, email: &str) -> Result<(User, String), AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = self.create_token(&user.email)?;
        tracing::info!("🔑 Login de {}", user.email);
        Ok((user, token))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_email(&token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub fn create_token(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        // TTL fora do intervalo de datas do chrono vira erro
        let expires_at = TimeDelta::try_days(self.token_ttl_days)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AppError::TokenTtlOutOfRange(self.token_ttl_days))?;

        let claims = Claims {
            sub: email.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn service(store: &Store) -> AuthService {
        AuthService::new(UserRepository::new(store.clone()), "segredo-de-teste".into(), 7)
    }

    #[tokio::test]
    async fn sign_in_issues_a_token_for_known_users() {
        let store = Store::default();
        let auth = service(&store);
        UserRepository::new(store.clone()).create_user("Ada", "ada@fs.io").await.unwrap();

        let (user, token) = auth.sign_in("ada@fs.io").await.unwrap();
        assert_eq!(user.name, "Ada");

        let validated = auth.validate_token(&token).await.unwrap();
        assert_eq!(validated, user);
    }

    #[tokio::test]
    async fn unknown_email_is_unauthorized() {
        let store = Store::default();
        assert!(matches!(
            service(&store).sign_in("ninguem@fs.io").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn out_of_range_ttl_is_an_error_not_a_panic() {
        let store = Store::default();
        let auth = AuthService::new(UserRepository::new(store), "segredo".into(), i64::MAX);
        assert!(matches!(
            auth.create_token("ada@fs.io"),
            Err(AppError::TokenTtlOutOfRange(_))
        ));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let store = Store::default();
        UserRepository::new(store.clone()).create_user("Ada", "ada@fs.io").await.unwrap();
        let other = AuthService::new(UserRepository::new(store.clone()), "outro".into(), 7);
        let token = other.create_token("ada@fs.io").unwrap();

        assert!(matches!(
            service(&store).validate_token(&token).await,
            Err(AppError::InvalidToken)
        ));
    }
}
