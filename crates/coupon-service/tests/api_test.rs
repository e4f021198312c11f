//! HTTP API 集成测试
//!
//! 以种子数据构建完整路由（含中间件），通过 `oneshot` 逐个发送请求。

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use coupon_service::routes::{build_router, cors_layer};
use coupon_service::state::AppState;
use coupon_shared::config::CorsConfig;

fn app_with(state: AppState) -> Router {
    build_router(state, cors_layer(&CorsConfig::default(), false))
}

fn app() -> (Router, AppState) {
    let state = AppState::seeded(Utc::now());
    (app_with(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "coupon-service");
}

#[tokio::test]
async fn test_list_coupons_and_stores() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/coupons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let coupons = body["data"].as_array().unwrap();
    assert_eq!(coupons.len(), 7);
    assert_eq!(coupons[0]["code"], "WELCOME25");
    assert_eq!(coupons[0]["type"], "FIRST_PURCHASE");

    let (_, body) = send(&app, Method::GET, "/api/stores", None).await;
    let stores = body["data"].as_array().unwrap();
    assert_eq!(stores.len(), 5);
    assert_eq!(stores[0]["couponsRedeemed"], 2);
}

#[tokio::test]
async fn test_lookup_by_code_and_token() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/coupons/LOYAL10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["discount"], 10);

    let (status, body) = send(&app, Method::GET, "/api/coupons/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COUPON_NOT_FOUND");
    assert_eq!(body["message"], "Cupom não encontrado: NOPE");

    let (status, body) = send(&app, Method::GET, "/api/stores/token/ANIMAL002", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Agropecuária Mundo Animal");

    let (status, body) = send(&app, Method::GET, "/api/stores/token/INVALID", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");
    assert_eq!(body["message"], "Token de loja inválido");
}

#[tokio::test]
async fn test_validate_verdicts() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/validate",
        Some(json!({"couponCode": "WELCOME25", "storeToken": "PATINHAS001"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["validity"], "VALID");
    assert_eq!(body["data"]["store"]["name"], "Pet Shop Patinhas");

    // 已使用的券仍返回详情
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/validate",
        Some(json!({"couponCode": "SUMMER30", "storeToken": "PATINHAS001"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "COUPON_ALREADY_USED");
    assert_eq!(body["message"], "Este cupom já foi utilizado");
    assert_eq!(body["data"]["coupon"]["code"], "SUMMER30");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/validate",
        Some(json!({"couponCode": "WELCOME25", "storeToken": "NOPE"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/validate",
        Some(json!({"couponCode": "", "storeToken": "PATINHAS001"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/validate",
        Some(json!({"couponCode": "   ", "storeToken": "PATINHAS001"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Por favor, informe o código do cupom");
}

#[tokio::test]
async fn test_redeem_welcome25_at_patinhas() {
    let (app, state) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/redeem",
        Some(json!({"couponCode": "WELCOME25", "storeId": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["coupon"]["isUsed"], true);
    assert_eq!(body["data"]["coupon"]["usedByStore"], "1");
    assert_eq!(body["data"]["storeCouponsRedeemed"], 3);

    let store = state
        .queries
        .find_store_by_token("PATINHAS001")
        .await
        .unwrap();
    assert_eq!(store.coupons_redeemed, 3);

    // 再次核销被拒绝，计数不变
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/redeem",
        Some(json!({"couponCode": "WELCOME25", "storeId": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "COUPON_ALREADY_USED");
    assert_eq!(body["message"], "Este cupom já foi utilizado");

    let store = state
        .queries
        .find_store_by_token("PATINHAS001")
        .await
        .unwrap();
    assert_eq!(store.coupons_redeemed, 3);
}

#[tokio::test]
async fn test_redeem_failures_change_nothing() {
    let (app, state) = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/coupons/redeem",
        Some(json!({"couponCode": "NOPE", "storeId": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/redeem",
        Some(json!({"couponCode": "LOYAL10", "storeId": "99"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "STORE_NOT_FOUND");

    let coupon = state.queries.get_coupon_by_code("LOYAL10").await.unwrap();
    assert!(!coupon.is_used);

    let stores = state.queries.list_stores().await.unwrap();
    let total: u32 = stores.iter().map(|s| s.coupons_redeemed).sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_expired_coupon_is_rejected() {
    // 目录基准时间设在 90 天前，未使用的券均已过期
    let state = AppState::seeded(Utc::now() - chrono::Duration::days(90));
    let app = app_with(state.clone());

    // 核验：返回 400，响应体仍携带门店与优惠券
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/validate",
        Some(json!({"couponCode": "WELCOME25", "storeToken": "PATINHAS001"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "COUPON_EXPIRED");
    assert_eq!(body["message"], "Este cupom está expirado");
    assert_eq!(body["data"]["validity"], "EXPIRED");
    assert_eq!(body["data"]["coupon"]["code"], "WELCOME25");
    assert_eq!(body["data"]["store"]["name"], "Pet Shop Patinhas");

    // 核销同样被拒绝
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/coupons/redeem",
        Some(json!({"couponCode": "WELCOME25", "storeId": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "COUPON_EXPIRED");
    assert_eq!(body["message"], "Este cupom está expirado");

    let coupon = state.queries.get_coupon_by_code("WELCOME25").await.unwrap();
    assert!(!coupon.is_used);
}

#[tokio::test]
async fn test_rule_lifecycle() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/rules", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/rules",
        Some(json!({
            "name": "Black Friday",
            "description": "Cupom de 40% na Black Friday",
            "type": "SPECIAL_PROMOTION",
            "discount": 40,
            "triggerType": "MANUAL"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], "6");
    assert_eq!(body["data"]["isActive"], true);

    let (status, body) = send(&app, Method::PATCH, "/api/rules/6/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = send(&app, Method::GET, "/api/rules/6", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isActive"], false);

    let (status, body) = send(&app, Method::PATCH, "/api/rules/42/toggle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RULE_NOT_FOUND");
}

#[tokio::test]
async fn test_create_rule_validation() {
    let (app, _) = app();

    for payload in [
        json!({"name": "", "description": "d", "type": "LOYALTY", "discount": 10, "triggerType": "MANUAL"}),
        json!({"name": "R", "description": "   ", "type": "LOYALTY", "discount": 10, "triggerType": "MANUAL"}),
        json!({"name": "R", "description": "d", "type": "LOYALTY", "discount": 0, "triggerType": "MANUAL"}),
        json!({"name": "R", "description": "d", "type": "LOYALTY", "discount": 150, "triggerType": "MANUAL"}),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/rules", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let (_, body) = send(&app, Method::GET, "/api/rules", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_analytics_report() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);

    let report = &body["data"];
    assert_eq!(report["totalRedeemed"], 4);
    assert_eq!(report["totalActive"], 3);
    assert_eq!(report["couponTypes"].as_array().unwrap().len(), 5);
    assert_eq!(report["couponTypes"][0]["type"], "SPECIAL_PROMOTION");
    assert_eq!(report["stores"][0]["storeName"], "Pet Shop Patinhas");
    assert_eq!(report["timeline"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stores")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
}
