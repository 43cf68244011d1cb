//! HTTP 边界集成测试
//!
//! 通过完整路由验证对外语义：统一响应包、状态码映射，以及
//! "令牌不存在" 与 "令牌已停用" 在 HTTP 层不可区分。

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use menux_server::core::{Config, Server, ServerState};
use menux_server::db::models::{MenuItemCreate, RestaurantCreate};
use menux_server::db::repository::{MenuItemRepository, RestaurantRepository};
use rust_decimal::Decimal;
use surrealdb::RecordId;

struct Fixture {
    app: Router,
    state: ServerState,
    restaurant: RecordId,
    item: RecordId,
}

async fn setup() -> Fixture {
    let state = ServerState::initialize_in_memory(Config::from_env())
        .await
        .unwrap();

    let restaurant = RestaurantRepository::new(state.get_db())
        .create(RestaurantCreate {
            name: "Golden Dragon".into(),
            description: None,
            address: None,
            phone: None,
            email: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();

    let item = MenuItemRepository::new(state.get_db())
        .create(MenuItemCreate {
            restaurant: restaurant.clone(),
            name: "Burger".into(),
            description: None,
            price: Decimal::new(950, 2),
        })
        .await
        .unwrap()
        .id
        .unwrap();

    Fixture {
        app: Server::build_router(state.clone()),
        state,
        restaurant,
        item,
    }
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let fx = setup().await;
    let response = fx.app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_and_deactivated_tokens_are_indistinguishable() {
    let fx = setup().await;

    let qr = fx
        .state
        .session_validator()
        .issue(&fx.restaurant, "12")
        .await
        .unwrap();

    // Valid token resolves
    let response = fx
        .app
        .clone()
        .oneshot(get(&format!("/api/session/{}", qr.code)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["table_label"], "12");

    // Unknown token
    let missing = fx
        .app
        .clone()
        .oneshot(get("/api/session/NOSUCH-1-0000"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let missing_body = json_body(missing).await;

    // Deactivated token
    let id = qr.id.unwrap().to_string();
    fx.state.session_validator().deactivate(&id).await.unwrap();
    let inactive = fx
        .app
        .clone()
        .oneshot(get(&format!("/api/session/{}", qr.code)))
        .await
        .unwrap();
    assert_eq!(inactive.status(), StatusCode::NOT_FOUND);
    let inactive_body = json_body(inactive).await;

    // Same code, same message: callers cannot probe token existence
    assert_eq!(missing_body, inactive_body);
    assert_eq!(missing_body["code"], "E4001");
}

#[tokio::test]
async fn issue_conflict_maps_to_409() {
    let fx = setup().await;
    let payload = json!({
        "restaurant_id": fx.restaurant.to_string(),
        "table_label": "7",
    });

    let first = fx
        .app
        .clone()
        .oneshot(post("/api/qrcodes", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = fx
        .app
        .clone()
        .oneshot(post("/api/qrcodes", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn order_flow_over_http() {
    let fx = setup().await;

    let response = fx
        .app
        .clone()
        .oneshot(post(
            "/api/orders",
            json!({
                "restaurant_id": fx.restaurant.to_string(),
                "lines": [
                    { "menu_item": fx.item.to_string(), "quantity": 2 },
                ],
                "table_label": "12",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order = json_body(response).await;
    assert_eq!(order["status"], "PENDING");
    let order_id = order["id"].as_str().unwrap().to_string();

    // Legal transition
    let response = fx
        .app
        .clone()
        .oneshot(post(
            &format!("/api/orders/{order_id}/transition"),
            json!({
                "restaurant_id": fx.restaurant.to_string(),
                "target_status": "CONFIRMED",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Illegal jump maps to 422
    let response = fx
        .app
        .clone()
        .oneshot(post(
            &format!("/api/orders/{order_id}/transition"),
            json!({
                "restaurant_id": fx.restaurant.to_string(),
                "target_status": "COMPLETED",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_rating_maps_to_400() {
    let fx = setup().await;

    let response = fx
        .app
        .clone()
        .oneshot(post(
            "/api/feedback",
            json!({
                "restaurant_id": fx.restaurant.to_string(),
                "rating": 6,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
