//! Runtime environment helpers
//!
//! Named startup routine for the store: make the data directory, copy a
//! read-only seed database into place when configured, then open and
//! migrate the single shared connection.

use common::env::SeedOutcome;
use configs::ShareConfig;
use models::db::{connect_and_migrate, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tracing::info;

/// Ensure the database file's directory exists and seed it on first boot.
pub async fn prepare_storage(cfg: &ShareConfig) -> anyhow::Result<SeedOutcome> {
    let outcome = common::env::bootstrap_seed(&cfg.db_path, cfg.seed_path.as_deref()).await?;
    info!(db = %cfg.db_path.display(), ?outcome, "storage prepared");
    Ok(outcome)
}

/// Prepare the storage location and open the process-wide connection.
pub async fn open_store(cfg: &ShareConfig) -> anyhow::Result<DatabaseConnection> {
    prepare_storage(cfg).await?;
    connect_and_migrate(&DatabaseConfig::from_share(cfg)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::{SeaOrmShareRepository, ShareRepository};
    use crate::test_support::{cleanup, temp_db_path};
    use serde_json::json;

    #[tokio::test]
    async fn opens_fresh_store_in_missing_directory() -> Result<(), anyhow::Error> {
        let path = temp_db_path();
        let cfg = ShareConfig { db_path: path.clone(), ..ShareConfig::default() };
        let db = open_store(&cfg).await?;
        assert!(path.exists());
        assert_eq!(models::shared_link::count(&db).await?, 0);
        db.close().await?;
        cleanup(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn seeded_links_resolve_after_fresh_deploy() -> Result<(), anyhow::Error> {
        // build a seed database the way a previous deployment would have left it
        let seed = temp_db_path();
        let seed_cfg = ShareConfig { db_path: seed.clone(), ..ShareConfig::default() };
        let db = open_store(&seed_cfg).await?;
        SeaOrmShareRepository::new(db.clone()).put("seededId01", &json!({"from": "seed"})).await?;
        db.close().await?;

        let writable = temp_db_path();
        let cfg = ShareConfig { db_path: writable.clone(), seed_path: Some(seed.clone()), ..ShareConfig::default() };
        assert_eq!(prepare_storage(&cfg).await?, SeedOutcome::Seeded);

        let db = connect_and_migrate(&DatabaseConfig::from_share(&cfg)).await?;
        let repo = SeaOrmShareRepository::new(db.clone());
        assert_eq!(repo.get("seededId01").await?, Some(json!({"from": "seed"})));

        // writes go to the writable copy only
        repo.put("newId00001", &json!(1)).await?;
        db.close().await?;
        let seed_db = open_store(&seed_cfg).await?;
        assert_eq!(models::shared_link::count(&seed_db).await?, 1);
        seed_db.close().await?;

        cleanup(&seed).await;
        cleanup(&writable).await;
        Ok(())
    }
}
