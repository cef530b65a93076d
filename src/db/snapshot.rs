// src/db/snapshot.rs

use std::{path::PathBuf, time::Duration};

use tokio::task::JoinHandle;

use crate::db::Store;

/// Regrava o snapshot do store a cada `period`. Falhas são logadas e a
/// próxima rodada tenta de novo.
pub fn spawn_snapshot_task(store: Store, path: PathBuf, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // O primeiro tick é imediato; o estado acabou de ser carregado.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match store.save(&path).await {
                Ok(()) => tracing::debug!("💾 Snapshot gravado em {}", path.display()),
                Err(e) => tracing::error!("🔥 Falha ao gravar snapshot: {:?}", e),
            }
        }
    })
}
