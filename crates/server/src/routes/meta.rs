use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use common::types::{DatabaseIndicator, Health, Info};

use crate::routes::ServerState;

/// Liveness plus a few facts about the deployment. Never fails.
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health {
        status: "OK".into(),
        environment: state.meta.environment.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database: DatabaseIndicator::from_configured(state.database_configured).as_str().into(),
        uptime: common::uptime::uptime_secs(),
    })
}

pub async fn info(State(state): State<ServerState>) -> Json<Info> {
    let meta = &state.meta;
    Json(Info {
        app: meta.name.clone(),
        version: meta.version.clone(),
        environment: meta.environment.clone(),
        author: meta.author.clone(),
    })
}
