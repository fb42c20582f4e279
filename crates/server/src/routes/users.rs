use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use models::user::{Collection, NewUser, UserRecord};
use serde_json::Value;
use service::store::StoreDescription;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// List users. File-backed stores may reload (and normalize) first.
pub async fn list_users(State(state): State<ServerState>) -> Json<Collection> {
    Json(state.store.list().await)
}

/// Create a user from `{name?, role?}`.
///
/// An empty body or a non-JSON content type counts as `{}`. A JSON body that
/// does not parse is a 400. Fields of the wrong type fall back to their
/// defaults without affecting the other field.
pub async fn create_user(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UserRecord>), JsonApiError> {
    let input = new_user_from_body(&headers, &body)?;
    let record = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

fn new_user_from_body(headers: &HeaderMap, body: &[u8]) -> Result<NewUser, JsonApiError> {
    if body.is_empty() || !is_json_content(headers) {
        return Ok(NewUser::default());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| JsonApiError::bad_request(format!("invalid JSON body: {e}")))?;
    Ok(NewUser::from_json_value(&value))
}

fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(mime) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Diagnostic dump of the backing file path and current users.
pub async fn debug_db(State(state): State<ServerState>) -> Json<StoreDescription> {
    Json(state.store.describe().await)
}
