use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::build_app;

struct TestApp {
    base_url: String,
}

async fn start_server(cfg: AppConfig) -> anyhow::Result<TestApp> {
    let app = build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_create_then_list_over_http() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("e2e_users_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.server.static_dir = "/nonexistent-static-dir-for-tests".into();
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.path = dir.join("db.json");

    let app = start_server(cfg).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/api/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "OK");

    let res = c.post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": "Eve", "role": "auditor"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created, json!({"id": 3, "name": "Eve", "role": "auditor"}));

    let res = c.get(format!("{}/api/users", app.base_url)).send().await?;
    let users = res.json::<Value>().await?;
    assert_eq!(users.as_array().map(Vec::len), Some(3));
    assert_eq!(users[2], created);

    // persisted as the users envelope
    let on_disk: Value = serde_json::from_slice(&tokio::fs::read(dir.join("db.json")).await?)?;
    assert_eq!(on_disk["users"], users);

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}
