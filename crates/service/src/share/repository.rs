use async_trait::async_trait;
use models::errors::ModelError;
use sea_orm::DatabaseConnection;

use super::domain::SharedRecord;
use crate::errors::ServiceError;

/// Persistence seam for shared payloads.
///
/// `put` must never overwrite: an existing id is reported as
/// `ServiceError::DuplicateId` so the caller can mint a new one.
#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn put(&self, id: &str, payload: &serde_json::Value) -> Result<SharedRecord, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<serde_json::Value>, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmShareRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmShareRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ShareRepository for SeaOrmShareRepository {
    async fn put(&self, id: &str, payload: &serde_json::Value) -> Result<SharedRecord, ServiceError> {
        match models::shared_link::create(&self.db, id, payload).await {
            Ok(m) => Ok(SharedRecord::from_model(m, payload.clone())),
            Err(ModelError::Duplicate(id)) => Err(ServiceError::DuplicateId(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<serde_json::Value>, ServiceError> {
        Ok(models::shared_link::find_payload(&self.db, id).await?)
    }
}

/// Simple in-memory mock repository for tests; counts calls so callers can
/// assert that a code path never reached storage.
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockShareRepository {
        rows: Mutex<HashMap<String, serde_json::Value>>,
        puts: AtomicUsize,
        gets: AtomicUsize,
        fail_with: Mutex<Option<String>>,
    }

    impl MockShareRepository {
        /// Make every subsequent call fail with a storage error.
        pub fn fail_with(&self, msg: &str) {
            *self.fail_with.lock().unwrap_or_else(|p| p.into_inner()) = Some(msg.to_string());
        }

        pub fn puts(&self) -> usize { self.puts.load(Ordering::SeqCst) }

        pub fn gets(&self) -> usize { self.gets.load(Ordering::SeqCst) }

        pub fn calls(&self) -> usize { self.puts() + self.gets() }

        pub fn len(&self) -> usize { self.rows.lock().unwrap_or_else(|p| p.into_inner()).len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn failure(&self) -> Option<ServiceError> {
            self.fail_with
                .lock()
                .unwrap_or_else(|p| p.into_inner())
                .clone()
                .map(ServiceError::Db)
        }
    }

    #[async_trait]
    impl ShareRepository for MockShareRepository {
        async fn put(&self, id: &str, payload: &serde_json::Value) -> Result<SharedRecord, ServiceError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            if let Some(e) = self.failure() {
                return Err(e);
            }
            let mut rows = self.rows.lock().unwrap_or_else(|p| p.into_inner());
            if rows.contains_key(id) {
                return Err(ServiceError::DuplicateId(id.to_string()));
            }
            rows.insert(id.to_string(), payload.clone());
            Ok(SharedRecord { id: id.to_string(), payload: payload.clone(), created_at: Utc::now() })
        }

        async fn get(&self, id: &str) -> Result<Option<serde_json::Value>, ServiceError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if let Some(e) = self.failure() {
                return Err(e);
            }
            Ok(self.rows.lock().unwrap_or_else(|p| p.into_inner()).get(id).cloned())
        }
    }
}
