pub mod auth;
pub mod company;
pub mod dashboard;
pub mod grant;
pub mod onboarding;
pub mod shareholder;

use std::collections::BTreeMap;

// IDs inteiros atribuídos por ordem de inserção
pub type EntityId = u32;

/// Próximo id livre de uma coleção: `max(ids) + 1`, com coleção vazia contando como 0.
pub fn next_id<T>(collection: &BTreeMap<EntityId, T>) -> EntityId {
    collection
        .last_key_value()
        .map_or(0, |(id, _)| *id)
        + 1
}
