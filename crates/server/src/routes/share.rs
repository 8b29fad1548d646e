use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[derive(Debug, Serialize)]
pub struct CreateShareOutput {
    pub id: String,
}

/// Pull `data` out of a `{ "data": ... }` body.
///
/// Empty bodies, malformed JSON, non-object bodies, and a missing or `null`
/// `data` field are all the same client error.
pub fn extract_data(body: &[u8]) -> Result<serde_json::Value, JsonApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(JsonApiError::data_required());
    }
    let parsed: serde_json::Value = serde_json::from_slice(body).map_err(|_| JsonApiError::data_required())?;
    let serde_json::Value::Object(mut fields) = parsed else {
        return Err(JsonApiError::data_required());
    };
    match fields.remove("data") {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(JsonApiError::data_required()),
    }
}

/// Read URL of a record; relative when no public base URL is configured.
pub fn location_for(base_url: &str, id: &str) -> String {
    format!("{}/api/share/{}", base_url.trim_end_matches('/'), id)
}

/// `POST /api/share`: store the payload, answer with its id only.
pub async fn create(State(state): State<ServerState>, body: Bytes) -> Result<impl IntoResponse, JsonApiError> {
    let data = extract_data(&body)?;
    let record = state.share.create(data).await?;
    info!(id = %record.id, "share_create");
    let location = location_for(&state.base_url, &record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreateShareOutput { id: record.id }),
    ))
}

/// `GET /api/share/:id`: the stored payload, unwrapped.
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<serde_json::Value>, JsonApiError> {
    let payload = state.share.get(&id).await?;
    Ok(Json(payload))
}

/// Plain `OPTIONS` requests that are not CORS pre-flights still get an empty 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
