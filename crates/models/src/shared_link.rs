use sea_orm::{entity::prelude::*, DatabaseConnection, EntityTrait, PaginatorTrait, QuerySelect, Set, SqlErr};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// Upper bound on accepted id length; generated ids are far shorter.
pub const MAX_ID_LEN: usize = 64;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shared_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

pub fn validate_id(id: &str) -> Result<(), errors::ModelError> {
    if id.is_empty() || id.len() > MAX_ID_LEN {
        return Err(errors::ModelError::Validation(format!("id must be 1..={MAX_ID_LEN} characters")));
    }
    if !id.chars().all(is_url_safe) {
        return Err(errors::ModelError::Validation("id must be URL-safe".into()));
    }
    Ok(())
}

fn map_db_err(id: &str, e: DbErr) -> errors::ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => errors::ModelError::Duplicate(id.to_string()),
        _ => errors::ModelError::Db(e.to_string()),
    }
}

/// Insert a new row. Never overwrites: an existing id yields `ModelError::Duplicate`.
pub async fn create(
    db: &DatabaseConnection,
    id: &str,
    payload: &serde_json::Value,
) -> Result<Model, errors::ModelError> {
    validate_id(id)?;
    let data = serde_json::to_string(payload).map_err(|e| errors::ModelError::Validation(e.to_string()))?;

    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(id.to_string()),
        data: Set(data.clone()),
        created_at: Set(now),
    };
    Entity::insert(am).exec(db).await.map_err(|e| map_db_err(id, e))?;
    Ok(Model { id: id.to_string(), data, created_at: now })
}

/// Fetch only the `data` column and decode it.
///
/// Ids that could never have been generated are answered with `None`
/// without querying the database.
pub async fn find_payload(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<serde_json::Value>, errors::ModelError> {
    if validate_id(id).is_err() {
        return Ok(None);
    }
    let raw: Option<String> = Entity::find_by_id(id.to_string())
        .select_only()
        .column(Column::Data)
        .into_tuple()
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;

    raw.map(|s| serde_json::from_str(&s).map_err(|e| errors::ModelError::Decode(e.to_string())))
        .transpose()
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    Entity::find().count(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
