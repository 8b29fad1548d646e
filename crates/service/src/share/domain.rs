use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted payload and the id it is reachable under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedRecord {
    pub id: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl SharedRecord {
    pub fn from_model(model: models::shared_link::Model, payload: serde_json::Value) -> Self {
        Self { id: model.id, payload, created_at: model.created_at.with_timezone(&Utc) }
    }
}
