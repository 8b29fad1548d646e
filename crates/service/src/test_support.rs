#![cfg(test)]
use std::path::{Path, PathBuf};

use sea_orm::DatabaseConnection;
use models::db::{connect_and_migrate, DatabaseConfig};

/// Unique SQLite file per test so tests can run in parallel.
pub fn temp_db_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("sharelink_service_{}", uuid::Uuid::new_v4()))
        .join("shared.db")
}

pub async fn get_db(path: &Path) -> Result<DatabaseConnection, anyhow::Error> {
    common::env::ensure_parent_dir(path).await?;
    let mut cfg = DatabaseConfig::for_path(path);
    cfg.acquire_timeout = std::time::Duration::from_secs(10);
    connect_and_migrate(&cfg).await
}

pub async fn cleanup(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = tokio::fs::remove_dir_all(parent).await;
    }
}
