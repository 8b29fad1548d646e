use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::domain::SharedRecord;
use super::repository::ShareRepository;
use crate::errors::ServiceError;
use crate::id_gen::{IdGenerator, RandomIdGenerator};

pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 3;

/// Application service for the shared-data store.
///
/// Every repository call runs under `op_timeout`; an id collision is retried
/// with a fresh id up to `max_id_attempts` times. Generic storage errors are
/// returned to the caller untouched.
pub struct ShareService {
    repo: Arc<dyn ShareRepository>,
    ids: Arc<dyn IdGenerator>,
    op_timeout: Duration,
    max_id_attempts: u32,
}

impl ShareService {
    pub fn new(repo: Arc<dyn ShareRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids, op_timeout: DEFAULT_OP_TIMEOUT, max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS }
    }

    pub fn from_config(repo: Arc<dyn ShareRepository>, cfg: &configs::ShareConfig) -> Self {
        Self::new(repo, Arc::new(RandomIdGenerator::new(cfg.id_length)))
            .with_op_timeout(Duration::from_secs(cfg.op_timeout_secs))
            .with_max_id_attempts(cfg.max_id_attempts)
    }

    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }

    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| ServiceError::Timeout(op))?
    }

    /// Persist `payload` under a newly minted id.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: serde_json::Value) -> Result<SharedRecord, ServiceError> {
        if payload.is_null() {
            return Err(ServiceError::Validation("Data is required".into()));
        }

        let mut last = ServiceError::Validation("no id attempts configured".into());
        for attempt in 1..=self.max_id_attempts {
            let id = self.ids.generate().map_err(|e| ServiceError::IdGeneration(e.to_string()))?;
            match self.bounded("put", self.repo.put(&id, &payload)).await {
                Ok(record) => {
                    info!(id = %record.id, attempt, "shared_payload_created");
                    return Ok(record);
                }
                Err(ServiceError::DuplicateId(taken)) => {
                    warn!(id = %taken, attempt, "share id collision, regenerating");
                    last = ServiceError::DuplicateId(taken);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last)
    }

    /// Return the stored payload for `id`.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<serde_json::Value, ServiceError> {
        match self.bounded("get", self.repo.get(id)).await? {
            Some(payload) => Ok(payload),
            None => {
                debug!(%id, "shared payload not found");
                Err(ServiceError::not_found("shared payload"))
            }
        }
    }
}
