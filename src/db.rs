pub mod store;
pub use store::{Ledger, Store};
pub mod snapshot;
pub use snapshot::spawn_snapshot_task;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod shareholder_repo;
pub use shareholder_repo::ShareholderRepository;
pub mod grant_repo;
pub use grant_repo::GrantRepository;
