pub mod auth;
pub mod company;
pub mod dashboard;
pub mod grants;
pub mod onboarding;
pub mod shareholders;
