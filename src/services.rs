pub mod auth;
pub mod equity_service;
pub mod onboarding_service;
