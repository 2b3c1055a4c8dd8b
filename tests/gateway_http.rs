//! HTTP gateway tests over a real socket

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use benefit_ledger::config::TransferConfig;
use benefit_ledger::gateway::{self, AppState};
use benefit_ledger::store::MemoryStore;

/// Start the gateway on an ephemeral port, returning its base URL
async fn spawn_gateway() -> String {
    let state = AppState::from_store(Arc::new(MemoryStore::new()), TransferConfig::default());
    let app = gateway::router(Arc::new(state));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn create(client: &reqwest::Client, base: &str, body: Value) -> Value {
    let resp = client
        .post(format!("{base}/api/benefits"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.unwrap()
}

async fn get(client: &reqwest::Client, base: &str, id: i64) -> Value {
    client
        .get(format!("{base}/api/benefits/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn assert_error_shape(body: &Value, status: u16) {
    assert_eq!(body["status"], status, "{body}");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()), "{body}");
    assert!(body["timestamp"].as_str().is_some(), "{body}");
}

#[tokio::test]
async fn test_health() {
    let base = spawn_gateway().await;
    let body: Value = reqwest::get(format!("{base}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "UP");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_crud_lifecycle() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();

    let created = create(
        &client,
        &base,
        json!({"name": "Meal Voucher", "description": "Daily meals", "value": 100}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["value"], "100.00");
    assert_eq!(created["version"], 0);
    assert_eq!(created["active"], true);
    assert!(created.get("createdAt").is_some());

    // Full update with the observed version
    let resp = client
        .put(format!("{base}/api/benefits/{id}"))
        .json(&json!({"name": "Meal Card", "value": "120.50", "active": true, "version": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "Meal Card");
    assert_eq!(updated["value"], "120.50");
    assert_eq!(updated["version"], 1);
    assert_eq!(updated["description"], Value::Null);

    // Same version again is stale
    let resp = client
        .put(format!("{base}/api/benefits/{id}"))
        .json(&json!({"name": "Meal Card", "value": "1.00", "active": true, "version": 0}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_error_shape(&resp.json().await.unwrap(), 409);

    // Deactivate hides it from the active list only
    let resp = client
        .patch(format!("{base}/api/benefits/{id}/deactivate"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let active: Vec<Value> = client
        .get(format!("{base}/api/benefits/active"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(active.is_empty());
    let all: Vec<Value> = client
        .get(format!("{base}/api/benefits"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["active"], false);

    // Delete is permanent
    let resp = client
        .delete(format!("{base}/api/benefits/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base}/api/benefits/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_error_shape(&resp.json().await.unwrap(), 404);

    let resp = client
        .delete(format!("{base}/api/benefits/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_validation() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();

    for body in [
        json!({"name": "ab", "value": "1.00"}),
        json!({"name": "Meal Voucher", "value": "-1.00"}),
        json!({"name": "Meal Voucher", "value": "1.001"}),
        json!({"name": "Meal Voucher", "value": ".5"}),
        json!({"name": "Meal Voucher", "value": "10000000000000.00"}),
        json!({"name": "Meal Voucher", "value": "1.00", "description": "x".repeat(256)}),
        json!({"id": 5, "name": "Meal Voucher", "value": "1.00"}),
        json!({"name": "Meal Voucher"}),
    ] {
        let resp = client
            .post(format!("{base}/api/benefits"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_error_shape(&resp.json().await.unwrap(), 400);
    }

    let resp = client
        .post(format!("{base}/api/benefits"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_error_shape(&resp.json().await.unwrap(), 400);

    let resp = client
        .get(format!("{base}/api/benefits/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();
    create(&client, &base, json!({"name": "Meal Voucher", "value": 1})).await;
    create(&client, &base, json!({"name": "Health Plan", "value": 1})).await;

    let hits: Vec<Value> = client
        .get(format!("{base}/api/benefits/search?name=VOUCH"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Meal Voucher");

    // Blank term lists everything
    let all: Vec<Value> = client
        .get(format!("{base}/api/benefits/search?name=%20"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_transfer_endpoint() {
    let base = spawn_gateway().await;
    let client = reqwest::Client::new();
    let a = create(&client, &base, json!({"name": "Meal Voucher", "value": "100.00"})).await;
    let b = create(&client, &base, json!({"name": "Food Card", "value": "50.00"})).await;
    let (a, b) = (a["id"].as_i64().unwrap(), b["id"].as_i64().unwrap());

    let transfer = |body: Value| {
        let client = client.clone();
        let url = format!("{base}/api/benefits/transfer");
        async move { client.post(url).json(&body).send().await.unwrap() }
    };

    let resp = transfer(json!({"fromId": a, "toId": b, "amount": 30})).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(&client, &base, a).await["value"], "70.00");
    assert_eq!(get(&client, &base, b).await["value"], "80.00");
    assert_eq!(get(&client, &base, a).await["version"], 1);

    let cases = [
        (json!({"fromId": a, "toId": a, "amount": "5.00"}), 400),
        (json!({"fromId": a, "toId": b, "amount": "0"}), 400),
        (json!({"fromId": a, "toId": b, "amount": "-5"}), 400),
        (json!({"fromId": a, "toId": b, "amount": "0.005"}), 400),
        (json!({"fromId": a, "toId": b, "amount": 0.005}), 400),
        (json!({"fromId": a, "toId": b, "amount": "10000000000000.00"}), 400),
        (json!({"fromId": a, "toId": b, "amount": "1000.00"}), 422),
        (json!({"fromId": a, "toId": 999, "amount": "1.00"}), 422),
        (json!({"fromId": a, "amount": "1.00"}), 400),
    ];
    for (body, status) in cases {
        let resp = transfer(body.clone()).await;
        assert_eq!(resp.status().as_u16(), status, "{body}");
        assert_error_shape(&resp.json().await.unwrap(), status);
    }

    // Rejections changed nothing
    assert_eq!(get(&client, &base, a).await["value"], "70.00");
    assert_eq!(get(&client, &base, b).await["value"], "80.00");
}

#[tokio::test]
async fn test_openapi_served() {
    let base = spawn_gateway().await;
    let resp = reqwest::get(format!("{base}/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let spec: Value = resp.json().await.unwrap();
    assert!(spec["paths"]["/api/benefits/transfer"].is_object());
}
