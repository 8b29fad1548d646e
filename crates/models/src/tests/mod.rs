use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::db::{connect_and_migrate, DatabaseConfig};



/// Throwaway SQLite file under the system temp dir.
pub(crate) fn temp_db_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("sharelink_models_{}", uuid::Uuid::new_v4()))
        .join("shared.db")
}

pub(crate) async fn setup_test_db(path: &PathBuf) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    connect_and_migrate(&DatabaseConfig::for_path(path)).await
}

pub(crate) async fn cleanup(path: &PathBuf) {
    if let Some(parent) = path.parent() {
        let _ = tokio::fs::remove_dir_all(parent).await;
    }
}
