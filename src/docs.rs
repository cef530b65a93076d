// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth / Users ---
        handlers::auth::sign_in,
        handlers::auth::create_user,
        handlers::auth::get_me,

        // --- Company ---
        handlers::company::get_company,
        handlers::company::create_company,
        handlers::company::get_value,
        handlers::company::update_value,

        // --- Shareholders ---
        handlers::shareholders::list_shareholders,
        handlers::shareholders::create_shareholder,
        handlers::shareholders::edit_shareholder,
        handlers::shareholders::get_shareholder,

        // --- Grants ---
        handlers::grants::list_grants,
        handlers::grants::create_grant,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Onboarding ---
        handlers::onboarding::start_onboarding,
        handlers::onboarding::get_onboarding,
        handlers::onboarding::dispatch_action,
        handlers::onboarding::preview_dashboard,
        handlers::onboarding::finalize_onboarding,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::CreateUserPayload,
            models::auth::SignInPayload,
            models::auth::AuthResponse,

            // --- Company ---
            models::company::Company,
            models::company::CompanyValue,
            models::company::UpdateValuePayload,

            // --- Cap table ---
            models::shareholder::ShareholderGroup,
            models::shareholder::Shareholder,
            models::shareholder::NewShareholder,
            models::shareholder::EditShareholderPayload,
            models::grant::ShareType,
            models::grant::Grant,
            models::grant::NewGrant,
            models::grant::CreateGrantPayload,

            // --- Dashboard ---
            models::dashboard::ChartMode,
            models::dashboard::ChartView,
            models::dashboard::ChartPoint,
            models::dashboard::ShareholderTotals,
            models::dashboard::MarketCap,
            models::dashboard::ShareholderRow,
            models::dashboard::DashboardResponse,
            models::dashboard::GrantLine,
            models::dashboard::ShareholderDetail,

            // --- Onboarding ---
            models::onboarding::OnboardingSnapshot,
            models::onboarding::OnboardingSession,
        )
    ),
    tags(
        (name = "Auth", description = "Login sem senha"),
        (name = "Users", description = "Contas de usuário"),
        (name = "Company", description = "Empresa e valor por ação"),
        (name = "Shareholders", description = "Acionistas"),
        (name = "Grants", description = "Concessões de ações"),
        (name = "Dashboard", description = "Market cap e distribuição do cap table"),
        (name = "Onboarding", description = "Wizard de cadastro")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
