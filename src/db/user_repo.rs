use crate::{
    common::error::AppError,
    db::Store,
    models::auth::User,
};

// O repositório de usuários, responsável pela coleção 'users' do store
#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.store.read().await.users.get(email).cloned())
    }

    // Cria um novo usuário; e-mail repetido vira EmailAlreadyExists
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError> {
        self.store
            .transaction(|ledger| ledger.insert_user(name, email))
            .await
    }
}
