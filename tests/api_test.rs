use preorder_core::{
    AppState,
    catalog::{Catalog, Dish},
    config::Config,
    create_app,
};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn test_config() -> Config {
    Config {
        server_port: 0,
        admin_username: "admin".to_string(),
        admin_password: "1234".to_string(),
        upi_payee_id: "kitchen@okicici".to_string(),
        upi_payee_name: "RFC Dinner".to_string(),
        feed_heartbeat_secs: 30,
    }
}

fn test_catalog() -> Catalog {
    Catalog::new(vec![
        Dish {
            id: 1,
            name: "Biryani".to_string(),
            price: 180,
        },
        Dish {
            id: 2,
            name: "Butter Chicken".to_string(),
            price: 150,
        },
    ])
}

async fn setup_test_app() -> String {
    let state = AppState::new(test_config(), test_catalog());
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn login(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/admin/login", base_url))
        .json(&json!({ "username": "admin", "password": "1234" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn place_order(client: &reqwest::Client, base_url: &str, dish_ids: &[u32]) -> Value {
    let res = client
        .post(format!("{}/orders", base_url))
        .json(&json!({
            "customer_name": "Asha",
            "customer_phone": "9876543210",
            "delivery_address": "12 Lake View Road",
            "dish_ids": dish_ids,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn menu_lists_dishes_in_configured_order() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/menu", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let dishes: Value = res.json().await.unwrap();
    assert_eq!(dishes[0]["name"], "Biryani");
    assert_eq!(dishes[0]["price"], 180);
    assert_eq!(dishes[1]["name"], "Butter Chicken");
}

#[tokio::test]
async fn placed_order_is_pending_with_computed_total() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    let order = place_order(&client, &base_url, &[1, 2]).await;
    assert_eq!(order["total"], 330);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["paid"], false);

    let order_id = order["id"].as_u64().unwrap();
    let res = client
        .get(format!("{}/orders/{}/status", base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let status: Value = res.json().await.unwrap();
    assert_eq!(status["status"], "pending");
    assert_eq!(status["paid"], false);
}

#[tokio::test]
async fn placement_without_resolvable_dishes_is_rejected() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    for dish_ids in [json!([]), json!([98, 99])] {
        let res = client
            .post(format!("{}/orders", base_url))
            .json(&json!({
                "customer_name": "Asha",
                "customer_phone": "9876543210",
                "delivery_address": "12 Lake View Road",
                "dish_ids": dish_ids,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    // Nothing was created.
    let token = login(&client, &base_url).await;
    let res = client
        .get(format!("{}/admin/orders", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let orders: Value = res.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn placement_requires_customer_fields() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/orders", base_url))
        .json(&json!({
            "customer_name": "   ",
            "customer_phone": "9876543210",
            "delivery_address": "12 Lake View Road",
            "dish_ids": [1],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_order_is_404() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/orders/424242/status", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/orders/424242", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_operations_require_a_session() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();
    let order = place_order(&client, &base_url, &[1]).await;
    let order_id = order["id"].as_u64().unwrap();

    // No token at all.
    let res = client
        .get(format!("{}/admin/orders", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // A made-up token.
    let res = client
        .post(format!("{}/admin/orders/{}/decision", base_url, order_id))
        .bearer_auth("00000000-0000-0000-0000-000000000000")
        .json(&json!({ "decision": "accept" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Bad credentials never yield a token.
    let res = client
        .post(format!("{}/admin/login", base_url))
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The order is untouched.
    let res = client
        .get(format!("{}/orders/{}/status", base_url, order_id))
        .send()
        .await
        .unwrap();
    let status: Value = res.json().await.unwrap();
    assert_eq!(status["status"], "pending");
}

#[tokio::test]
async fn full_lifecycle_walkthrough() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    let order = place_order(&client, &base_url, &[1, 2]).await;
    let order_id = order["id"].as_u64().unwrap();
    assert_eq!(order["total"], 330);

    // Payment is not available before acceptance.
    let res = client
        .get(format!("{}/orders/{}/payment", base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let token = login(&client, &base_url).await;

    // Accept.
    let res = client
        .post(format!("{}/admin/orders/{}/decision", base_url, order_id))
        .bearer_auth(&token)
        .json(&json!({ "decision": "accept" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let accepted: Value = res.json().await.unwrap();
    assert_eq!(accepted["status"], "payment_pending");

    let res = client
        .get(format!("{}/orders/{}/status", base_url, order_id))
        .send()
        .await
        .unwrap();
    let status: Value = res.json().await.unwrap();
    assert_eq!(status["status"], "payment_pending");
    assert_eq!(status["paid"], false);

    // The customer can now fetch payment instructions.
    let res = client
        .get(format!("{}/orders/{}/payment", base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let payment: Value = res.json().await.unwrap();
    assert_eq!(payment["amount"], 330);
    assert!(payment["upi_uri"].as_str().unwrap().starts_with("upi://pay?"));
    assert!(payment["qr_url"].as_str().unwrap().contains("size=300x300"));

    // Accepting again conflicts.
    let res = client
        .post(format!("{}/admin/orders/{}/decision", base_url, order_id))
        .bearer_auth(&token)
        .json(&json!({ "decision": "accept" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Mark paid.
    let res = client
        .post(format!("{}/admin/orders/{}/paid", base_url, order_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let paid: Value = res.json().await.unwrap();
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["paid"], true);

    let res = client
        .get(format!("{}/orders/{}/status", base_url, order_id))
        .send()
        .await
        .unwrap();
    let status: Value = res.json().await.unwrap();
    assert_eq!(status["status"], "paid");
    assert_eq!(status["paid"], true);

    // Paid is terminal.
    let res = client
        .post(format!("{}/admin/orders/{}/paid", base_url, order_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .post(format!("{}/admin/orders/{}/decision", base_url, order_id))
        .bearer_auth(&token)
        .json(&json!({ "decision": "decline" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn declined_order_cannot_be_paid() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();

    let order = place_order(&client, &base_url, &[1]).await;
    let order_id = order["id"].as_u64().unwrap();
    let token = login(&client, &base_url).await;

    let res = client
        .post(format!("{}/admin/orders/{}/decision", base_url, order_id))
        .bearer_auth(&token)
        .json(&json!({ "decision": "decline" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let declined: Value = res.json().await.unwrap();
    assert_eq!(declined["status"], "declined");

    let res = client
        .post(format!("{}/admin/orders/{}/paid", base_url, order_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(format!("{}/orders/{}/payment", base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let base_url = setup_test_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &base_url).await;

    let res = client
        .post(format!("{}/admin/logout", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/admin/orders", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
