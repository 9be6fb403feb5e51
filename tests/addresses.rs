mod common;

use axum::http::StatusCode;
use common::{TestClient, test_app};

async fn add_home(client: &mut TestClient, name: &str) -> i64 {
    let response = client
        .post(
            "/addaddress/",
            &[
                ("name", name),
                ("country", "pl"),
                ("city", "Warsaw"),
                ("address", "Main 1"),
                ("zip_code", "00-001"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    response.body["data"]["id"].as_i64().expect("address id")
}

#[tokio::test]
async fn added_address_shows_on_the_dashboard() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    let id = add_home(&mut alice, "Home").await;

    let dashboard = alice.get("/logged/").await;
    let addresses = dashboard.body["data"]["addresses"]
        .as_array()
        .expect("addresses")
        .clone();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0]["name"], "Home");
    assert_eq!(addresses[0]["country"], "PL");

    let one = alice.get(&format!("/address/{id}/")).await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["data"]["city"], "Warsaw");
}

#[tokio::test]
async fn dashboard_orders_addresses_by_name() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;
    add_home(&mut alice, "Work").await;
    add_home(&mut alice, "Home").await;

    let dashboard = alice.get("/logged/").await;
    let names: Vec<_> = dashboard.body["data"]["addresses"]
        .as_array()
        .expect("addresses")
        .iter()
        .map(|a| a["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["Home", "Work"]);
}

#[tokio::test]
async fn invalid_address_is_rejected_with_field_errors() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    let response = alice
        .post(
            "/addaddress/",
            &[
                ("name", "Home"),
                ("country", "XX"),
                ("city", ""),
                ("address", "Main 1"),
                ("zip_code", "00-001-00000"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = &response.body["data"]["errors"]["fields"];
    assert!(fields["country"].is_array());
    assert!(fields["city"].is_array());
    assert!(fields["zip_code"].is_array());
    assert!(fields.get("name").is_none());

    let dashboard = alice.get("/logged/").await;
    assert_eq!(dashboard.body["data"]["addresses"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn edit_prefills_and_saves() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;
    let id = add_home(&mut alice, "Home").await;

    let form = alice.get(&format!("/changeaddress/{id}/")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert_eq!(form.body["data"]["form"]["zip_code"], "00-001");

    let saved = alice
        .post(
            &format!("/changeaddress/{id}/"),
            &[
                ("name", "Home"),
                ("country", "DE"),
                ("city", "Berlin"),
                ("address", "Hauptstr. 2"),
                ("zip_code", "10115"),
            ],
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.body["data"]["form"]["city"], "Berlin");

    let one = alice.get(&format!("/address/{id}/")).await;
    assert_eq!(one.body["data"]["country"], "DE");
}

#[tokio::test]
async fn delete_redirects_to_the_dashboard() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;
    let id = add_home(&mut alice, "Home").await;

    let deleted = alice.post(&format!("/address/{id}/"), &[]).await;
    assert_eq!(deleted.status, StatusCode::SEE_OTHER);
    assert_eq!(deleted.location.as_deref(), Some("/logged/"));
    assert_eq!(
        alice.get(&format!("/address/{id}/")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn another_users_address_is_not_found_and_left_alone() {
    let app = test_app();
    let mut bob = app.client();
    bob.signed_up("bob", "pw").await;
    let bobs = add_home(&mut bob, "Home").await;

    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    assert_eq!(alice.get(&format!("/address/{bobs}/")).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        alice.get(&format!("/changeaddress/{bobs}/")).await.status,
        StatusCode::NOT_FOUND
    );
    let edit = alice
        .post(
            &format!("/changeaddress/{bobs}/"),
            &[
                ("name", "Mine"),
                ("country", "PL"),
                ("city", "Krakow"),
                ("address", "Other 2"),
                ("zip_code", "30-001"),
            ],
        )
        .await;
    assert_eq!(edit.status, StatusCode::NOT_FOUND);
    let delete = alice.post(&format!("/address/{bobs}/"), &[]).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let intact = bob.get(&format!("/address/{bobs}/")).await;
    assert_eq!(intact.status, StatusCode::OK);
    assert_eq!(intact.body["data"]["name"], "Home");
    assert_eq!(intact.body["data"]["city"], "Warsaw");
}

#[tokio::test]
async fn ids_that_cannot_name_a_record_are_not_found() {
    let app = test_app();
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    for path in ["/address/99999999999/", "/address/abc/", "/changeaddress/-/"] {
        let response = alice.get(path).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.body["message"], "Not Found", "{path}");
    }
    let delete = alice.post("/address/99999999999/", &[]).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}
