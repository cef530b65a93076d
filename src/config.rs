// src/config.rs

use anyhow::Context;
use chrono::{TimeDelta, Utc};
use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    db::{CompanyRepository, GrantRepository, ShareholderRepository, Store, UserRepository},
    services::{auth::AuthService, equity_service::EquityService, onboarding_service::OnboardingService},
};

// Configuração lida do ambiente (.env opcional)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub data_file: PathBuf,
    // Zero desliga o snapshot periódico
    pub snapshot_interval: Duration,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "data.json".to_string()).into();
        let snapshot_secs = parse_var::<u64>("SNAPSHOT_INTERVAL_SECS", 5)?;
        let token_ttl_days = check_token_ttl(parse_var::<i64>("TOKEN_TTL_DAYS", 7)?)?;

        Ok(Self {
            bind_addr,
            jwt_secret,
            data_file,
            snapshot_interval: Duration::from_secs(snapshot_secs),
            token_ttl_days,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} deve ser um inteiro, veio '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

// A validade do token precisa caber numa data do chrono
fn check_token_ttl(days: i64) -> anyhow::Result<i64> {
    anyhow::ensure!(days >= 0, "TOKEN_TTL_DAYS não pode ser negativo, veio {}", days);
    TimeDelta::try_days(days)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .with_context(|| format!("TOKEN_TTL_DAYS fora do intervalo suportado: {}", days))?;
    Ok(days)
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub user_repo: UserRepository,
    pub company_repo: CompanyRepository,
    pub shareholder_repo: ShareholderRepository,
    pub grant_repo: GrantRepository,
    pub auth_service: AuthService,
    pub equity_service: EquityService,
    pub onboarding_service: OnboardingService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Store::load_or_default(&config.data_file).await?;
        tracing::info!("✅ Store pronto (snapshot em {})", config.data_file.display());

        Ok(Self::from_store(store, config.jwt_secret.clone(), config.token_ttl_days))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_store(store: Store, jwt_secret: String, token_ttl_days: i64) -> Self {
        let user_repo = UserRepository::new(store.clone());
        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, token_ttl_days);

        Self {
            user_repo,
            company_repo: CompanyRepository::new(store.clone()),
            shareholder_repo: ShareholderRepository::new(store.clone()),
            grant_repo: GrantRepository::new(store.clone()),
            auth_service,
            equity_service: EquityService::new(store.clone()),
            onboarding_service: OnboardingService::new(store.clone()),
            store,
        }
    }
}
