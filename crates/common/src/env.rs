//! Environment/runtime helpers
//!
//! Startup checks that make sure the storage location is writable and,
//! when a deployment ships a read-only seed database, that it is copied
//! into place before the store opens it.

use std::path::Path;

use tracing::{info, warn};

/// What happened to the database file during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The database file already existed; nothing was copied.
    Existing,
    /// The seed file was copied to the database location.
    Seeded,
    /// No database and no usable seed; the store will start empty.
    Fresh,
}

/// Create the parent directory of `file` if it is missing.
pub async fn ensure_parent_dir(file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}

/// Copy `seed` to `db_path` when the database does not exist yet.
///
/// An existing database is never overwritten. A configured seed that is
/// missing on disk is logged and treated as "start empty".
pub async fn bootstrap_seed(db_path: &Path, seed: Option<&Path>) -> anyhow::Result<SeedOutcome> {
    ensure_parent_dir(db_path).await?;

    if tokio::fs::try_exists(db_path).await.unwrap_or(false) {
        return Ok(SeedOutcome::Existing);
    }
    let Some(seed) = seed else {
        return Ok(SeedOutcome::Fresh);
    };
    if seed == db_path {
        return Ok(SeedOutcome::Fresh);
    }
    if !tokio::fs::try_exists(seed).await.unwrap_or(false) {
        warn!(seed = %seed.display(), "seed database not found; starting with an empty store");
        return Ok(SeedOutcome::Fresh);
    }

    let bytes = tokio::fs::copy(seed, db_path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot copy seed {} to {}: {e}", seed.display(), db_path.display()))?;
    info!(seed = %seed.display(), db = %db_path.display(), bytes, "seeded database from read-only copy");
    Ok(SeedOutcome::Seeded)
}
