// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    let payout_routes = Router::new()
        .route(
            "/batch",
            post(handlers::payouts::create_batch).get(handlers::payouts::list_batches),
        )
        .route("/batch/{id}", get(handlers::payouts::get_batch));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/employees",
            post(handlers::employees::create_employee).get(handlers::employees::list_employees),
        )
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route("/api/esops", post(handlers::esops::grant_esop))
        .nest("/api/payouts", payout_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app_state, MemoryStore, RecordingMailer};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{TimeDelta, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app(store: &Arc<MemoryStore>, mailer: &Arc<RecordingMailer>) -> Router {
        build_router(app_state(store.clone(), mailer.clone()))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let response = app(&store, &mailer).oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn creates_and_lists_employees() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/employees",
                json!({
                    "name": "Ada Lovelace",
                    "email": "ada@example.com",
                    "walletAddress": "0x52908400098527886E0F7030069857D2E4169EE7",
                    "salaryUSD": 4200.5
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["employee"]["name"], "Ada Lovelace");
        assert_eq!(body["employee"]["salaryUSD"].as_f64(), Some(4200.5));
        assert!(body["employee"]["_id"].is_string());

        let (status, body) = call(app(&store, &mailer), get("/api/employees")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["employees"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn employee_with_missing_fields_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let (status, body) = call(
            app(&store, &mailer),
            json_request("POST", "/api/employees", json!({ "name": "Ada" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/employees",
                json!({ "name": "", "email": "ada@example.com", "walletAddress": "0x1", "salaryUSD": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("name is required"));
    }

    #[tokio::test]
    async fn batch_with_unknown_employee() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let e1 = store.add_employee("Ada", "ada@example.com", "0xada");
        let e2 = Uuid::new_v4();

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/payouts/batch",
                json!({
                    "txHash": "0xabc",
                    "payouts": [
                        { "_id": e1.id, "salaryUSD": 1000.4 },
                        { "_id": e2, "salaryUSD": 999.6 }
                    ]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["batch"]["txHash"], "0xabc");
        assert_eq!(body["batch"]["totalAmount"].as_f64(), Some(2000.0));

        let payouts = body["payouts"].as_array().unwrap();
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0]["employeeId"], json!(e1.id));
        assert_eq!(payouts[0]["amountUSD"].as_f64(), Some(1000.0));
        assert_eq!(payouts[0]["status"], "completed");
        assert_eq!(payouts[0]["batchId"], body["batch"]["_id"]);

        assert_eq!(body["skipped"][0]["employeeId"], json!(e2));
        assert_eq!(body["skipped"][0]["reason"], "employee_not_found");
        assert_eq!(body["paidAmount"].as_f64(), Some(1000.0));

        // Notificação fica na outbox; nada é enviado durante a requisição
        assert_eq!(store.outbox().len(), 1);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn batch_records_connected_wallet() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/payouts/batch")
            .header("content-type", "application/json")
            .header("x-wallet-address", "0x52908400098527886E0F7030069857D2E4169EE7")
            .body(Body::from(json!({ "txHash": "0x1", "payouts": [] }).to_string()))
            .unwrap();

        let (status, body) = call(app(&store, &mailer), request).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["batch"]["submittedBy"], "0x52908400098527886E0F7030069857D2E4169EE7");
    }

    #[tokio::test]
    async fn malformed_wallet_header_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let request = Request::builder()
            .method("POST")
            .uri("/api/payouts/batch")
            .header("content-type", "application/json")
            .header("x-wallet-address", "not-a-wallet")
            .body(Body::from(json!({ "txHash": "0x1", "payouts": [] }).to_string()))
            .unwrap();

        let (status, body) = call(app(&store, &mailer), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(store.batches().is_empty());
    }

    #[tokio::test]
    async fn batch_failure_hides_details() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        store.fail_commits(true);

        let (status, body) = call(
            app(&store, &mailer),
            json_request("POST", "/api/payouts/batch", json!({ "txHash": "0x1", "payouts": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Failed to create payout batch" }));
    }

    #[tokio::test]
    async fn batch_skips_opaque_unknown_ids() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let e1 = store.add_employee("Ada", "ada@example.com", "0xada");

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/payouts/batch",
                json!({
                    "txHash": "0xabc",
                    "payouts": [
                        { "_id": e1.id, "salaryUSD": 1000.4 },
                        { "_id": "E2", "salaryUSD": 999.6 }
                    ]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["payouts"].as_array().unwrap().len(), 1);
        assert_eq!(body["skipped"][0]["employeeId"], "E2");
        assert_eq!(body["skipped"][0]["reason"], "employee_not_found");
        assert_eq!(store.batches().len(), 1);
        assert_eq!(store.payouts().len(), 1);
    }

    #[tokio::test]
    async fn batch_detail_keeps_request_order() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let ids: Vec<Uuid> = ["C", "A", "B"]
            .iter()
            .map(|name| store.add_employee(name, &format!("{name}@example.com"), "0x0").id)
            .collect();
        let lines: Vec<Value> = ids
            .iter()
            .rev()
            .map(|id| json!({ "_id": id, "salaryUSD": 1 }))
            .collect();

        let (_, created) = call(
            app(&store, &mailer),
            json_request("POST", "/api/payouts/batch", json!({ "txHash": "0x1", "payouts": lines })),
        )
        .await;
        let batch_id = created["batch"]["_id"].as_str().unwrap().to_string();

        let (_, body) = call(app(&store, &mailer), get(&format!("/api/payouts/batch/{batch_id}"))).await;
        let order: Vec<Value> = body["payouts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["employeeId"].clone())
            .collect();
        let expected: Vec<Value> = ids.iter().rev().map(|id| json!(id)).collect();
        assert_eq!(order, expected);
    }

    #[tokio::test]
    async fn batches_are_listed_newest_first() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let t0 = Utc::now();
        store.insert_batch("0xmiddle", t0 + TimeDelta::seconds(1));
        store.insert_batch("0xnewest", t0 + TimeDelta::seconds(2));
        store.insert_batch("0xoldest", t0);

        let (status, body) = call(app(&store, &mailer), get("/api/payouts/batch")).await;

        assert_eq!(status, StatusCode::OK);
        let hashes: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["txHash"].as_str().unwrap())
            .collect();
        assert_eq!(hashes, ["0xnewest", "0xmiddle", "0xoldest"]);
    }

    #[tokio::test]
    async fn batch_detail_and_not_found() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let e1 = store.add_employee("Ada", "ada@example.com", "0xada");

        let (_, created) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/payouts/batch",
                json!({ "txHash": "0xabc", "payouts": [{ "_id": e1.id, "salaryUSD": 10 }] }),
            ),
        )
        .await;
        let batch_id = created["batch"]["_id"].as_str().unwrap().to_string();

        let (status, body) = call(app(&store, &mailer), get(&format!("/api/payouts/batch/{batch_id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["batch"]["_id"], batch_id.as_str());
        assert_eq!(body["payouts"].as_array().unwrap().len(), 1);

        let (status, body) = call(
            app(&store, &mailer),
            get(&format!("/api/payouts/batch/{}", Uuid::new_v4())),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Payout batch not found");
    }

    #[tokio::test]
    async fn esop_grant_sends_email() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());
        let ada = store.add_employee("Ada", "ada@example.com", "0xada");

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/esops",
                json!({
                    "employeeId": ada.id,
                    "totalTokens": 10000,
                    "durationMonths": 48,
                    "cliffMonths": 12,
                    "startDate": "2025-01-31"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].subject, "You've been granted an ESOP by Your Company");
    }

    #[tokio::test]
    async fn esop_for_unknown_employee_is_500() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/esops",
                json!({
                    "employeeId": Uuid::new_v4(),
                    "totalTokens": 10000,
                    "durationMonths": 48,
                    "cliffMonths": 12,
                    "startDate": "2025-01-31"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Employee not found" }));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn esop_with_non_uuid_employee_is_500() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let (status, body) = call(
            app(&store, &mailer),
            json_request(
                "POST",
                "/api/esops",
                json!({
                    "employeeId": "E1",
                    "totalTokens": 10000,
                    "durationMonths": 48,
                    "cliffMonths": 12,
                    "startDate": "2025-01-31"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": "Employee not found" }));
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let store = Arc::new(MemoryStore::default());
        let mailer = Arc::new(RecordingMailer::default());

        let (status, body) = call(app(&store, &mailer), get("/api/settings")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["organizationName"].is_null());

        let (status, body) = call(
            app(&store, &mailer),
            json_request("PUT", "/api/settings", json!({ "organizationName": "Acme Labs" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["organizationName"], "Acme Labs");

        let (_, body) = call(app(&store, &mailer), get("/api/settings")).await;
        assert_eq!(body["organizationName"], "Acme Labs");
    }
}
