mod common;

use axum::http::StatusCode;
use common::test_app;

#[tokio::test]
async fn adding_twice_creates_two_lines_of_one() {
    let app = test_app();
    let product = app.product(1, "Ryzen", true).await;
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    let add = format!("/add-to-cart/{}/", product.id);
    for _ in 0..2 {
        let response = alice.get(&add).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(
            response.location,
            Some(format!("/product/{}/", product.id))
        );
    }

    let cart = alice.get("/cart/").await;
    let lines = cart.body["data"]["lines"].as_array().expect("lines").clone();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|entry| entry["line"]["quantity"] == 1));
    assert_eq!(cart.body["data"]["total"], "399.98");
}

#[tokio::test]
async fn unknown_product_cannot_be_added() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    assert_eq!(alice.get("/add-to-cart/404/").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        alice.get("/add-to-cart/99999999999/").await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn removal_is_scoped_to_the_owner() {
    let app = test_app();
    let product = app.product(2, "Radeon", true).await;

    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;
    alice.get(&format!("/add-to-cart/{}/", product.id)).await;
    let cart = alice.get("/cart/").await;
    let line_id = cart.body["data"]["lines"][0]["line"]["id"]
        .as_i64()
        .expect("line id");
    let remove = format!("/remove-from-cart/{line_id}/");

    let mut bob = app.client();
    bob.signed_up("bob", "pw").await;
    assert_eq!(bob.get(&remove).await.status, StatusCode::NOT_FOUND);
    let cart = alice.get("/cart/").await;
    assert_eq!(cart.body["data"]["lines"].as_array().map(Vec::len), Some(1));

    let removed = alice.get(&remove).await;
    assert_eq!(removed.status, StatusCode::SEE_OTHER);
    assert_eq!(removed.location.as_deref(), Some("/cart/"));
    let cart = alice.get("/cart/").await;
    assert_eq!(cart.body["data"]["lines"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn placing_an_order_links_the_lines_and_empties_the_cart() {
    let app = test_app();
    let cpu = app.product(1, "Ryzen", true).await;
    let gpu = app.product(2, "Radeon", true).await;
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;
    alice.get(&format!("/add-to-cart/{}/", cpu.id)).await;
    alice.get(&format!("/add-to-cart/{}/", gpu.id)).await;

    let placed = alice.post("/cart/", &[]).await;
    assert_eq!(placed.status, StatusCode::OK);
    let order = &placed.body["data"];
    assert_eq!(order["lines"].as_array().map(Vec::len), Some(2));
    let order_id = order["order"]["order_id"].as_str().expect("uuid").to_string();
    assert_eq!(order_id.len(), 36);

    let cart = alice.get("/cart/").await;
    assert_eq!(cart.body["data"]["lines"].as_array().map(Vec::len), Some(0));
    assert_eq!(cart.body["data"]["total"], "0");

    // The path segment does not filter; every order is listed.
    let orders = alice.get("/order/anything/").await;
    assert_eq!(orders.status, StatusCode::OK);
    let listed = orders.body["data"]["orders"].as_array().expect("orders").clone();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["order"]["order_id"], order_id.as_str());
    assert_eq!(listed[0]["lines"].as_array().map(Vec::len), Some(2));

    let dashboard = alice.get("/logged/").await;
    assert_eq!(dashboard.body["data"]["orders"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn later_orders_only_take_new_lines_and_list_first() {
    let app = test_app();
    let cpu = app.product(1, "Ryzen", true).await;
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    alice.get(&format!("/add-to-cart/{}/", cpu.id)).await;
    let first = alice.post("/cart/", &[]).await;
    alice.get(&format!("/add-to-cart/{}/", cpu.id)).await;
    alice.get(&format!("/add-to-cart/{}/", cpu.id)).await;
    let second = alice.post("/cart/", &[]).await;
    assert_eq!(second.body["data"]["lines"].as_array().map(Vec::len), Some(2));

    let orders = alice.get("/order/1/").await;
    let listed = orders.body["data"]["orders"].as_array().expect("orders").clone();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["order"]["order_id"], second.body["data"]["order"]["order_id"]);
    assert_eq!(listed[1]["order"]["order_id"], first.body["data"]["order"]["order_id"]);
}

#[tokio::test]
async fn empty_cart_cannot_be_ordered() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    let placed = alice.post("/cart/", &[]).await;
    assert_eq!(placed.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        placed.body["data"]["errors"]["non_field"][0],
        "Your cart is empty."
    );

    let orders = alice.get("/order/1/").await;
    assert_eq!(orders.body["data"]["orders"].as_array().map(Vec::len), Some(0));
}
