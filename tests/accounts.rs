mod common;

use axum::http::StatusCode;
use common::test_app;
use webshop::{auth::password::verify_password, store::Store};

#[tokio::test]
async fn underage_registration_is_rejected_and_nothing_is_stored() {
    let app = test_app();
    let mut client = app.client();

    let response = client.register("kid", "pw123", "2020-01-01").await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = &response.body["data"]["errors"]["fields"];
    assert!(errors["birth_date"].is_array());
    assert!(response.body["data"]["form"].get("password").is_none());
    assert_eq!(response.body["data"]["form"]["username"], "kid");

    let stored = app.store.find_user_by_username("kid").await.expect("lookup");
    assert!(stored.is_none());
}

#[tokio::test]
async fn registration_stores_user_with_profile_and_hashed_password() {
    let app = test_app();
    let mut client = app.client();

    let response = client.register("alice", "pw123", "1994-05-01").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
    // Registration does not log in.
    assert!(client.cookie.is_none());

    let user = app
        .store
        .find_user_by_username("alice")
        .await
        .expect("lookup")
        .expect("alice exists");
    assert_ne!(user.password_hash, "pw123");
    assert!(verify_password("pw123", &user.password_hash).expect("verify"));

    let profile = app
        .store
        .find_profile(user.id)
        .await
        .expect("lookup")
        .expect("profile exists");
    assert_eq!(profile.user_id, user.id);
    assert_eq!(profile.birth_date.to_string(), "1994-05-01");
}

#[tokio::test]
async fn duplicate_username_is_a_field_error() {
    let app = test_app();
    let mut client = app.client();

    assert_eq!(client.register("alice", "pw123", "1994-05-01").await.status, StatusCode::OK);
    let again = client.register("alice", "other", "1990-01-01").await;
    assert_eq!(again.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(again.body["data"]["errors"]["fields"]["username"].is_array());
}

#[tokio::test]
async fn login_failure_does_not_reveal_which_part_was_wrong() {
    let app = test_app();
    let mut client = app.client();
    client.register("alice", "pw123", "1994-05-01").await;

    let unknown = client.login("nobody", "pw123").await;
    let wrong = client.login("alice", "nope").await;

    assert_eq!(unknown.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(wrong.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        unknown.body["data"]["errors"]["non_field"],
        wrong.body["data"]["errors"]["non_field"]
    );
    assert_eq!(
        wrong.body["data"]["errors"]["non_field"][0],
        "Invalid login or password."
    );
    assert_eq!(wrong.body["data"]["form"]["username"], "alice");
    assert!(wrong.body["data"]["form"].get("password").is_none());
    assert!(client.cookie.is_none());
}

#[tokio::test]
async fn login_redirects_home_and_opens_the_dashboard() {
    let app = test_app();
    let mut client = app.client();
    client.register("alice", "pw123", "1994-05-01").await;

    let login = client.login("alice", "pw123").await;
    assert_eq!(login.status, StatusCode::SEE_OTHER);
    assert_eq!(login.location.as_deref(), Some("/home/"));

    let dashboard = client.get("/logged/").await;
    assert_eq!(dashboard.status, StatusCode::OK);
    let data = &dashboard.body["data"];
    assert_eq!(data["account"]["username"], "alice");
    assert_eq!(data["addresses"].as_array().map(Vec::len), Some(0));
    assert_eq!(data["orders"].as_array().map(Vec::len), Some(0));

    let home = client.get("/home/").await;
    assert_eq!(home.body["data"]["username"], "alice");
}

#[tokio::test]
async fn protected_pages_redirect_to_login_with_next() {
    let app = test_app();
    let mut client = app.client();

    for path in [
        "/logged/",
        "/updateuser/",
        "/changepassword/",
        "/addaddress/",
        "/address/1/",
        "/changeaddress/1/",
        "/cart/",
        "/add-to-cart/1/",
        "/remove-from-cart/1/",
        "/order/1/",
        "/remove-comment/1/1/",
    ] {
        let response = client.get(path).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            response.location.as_deref(),
            Some(format!("/login/?next={path}").as_str()),
            "{path}"
        );
    }

    let comment = client.post("/product/1/", &[("text", "hi")]).await;
    assert_eq!(comment.location.as_deref(), Some("/login/?next=/product/1/"));
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = test_app();
    let mut client = app.client();
    client.signed_up("alice", "pw123").await;

    let first = client.get("/logout/").await;
    let second = client.get("/logout/").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["authenticated"], false);

    let dashboard = client.get("/logged/").await;
    assert_eq!(dashboard.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn account_update_validates_and_persists() {
    let app = test_app();
    let mut client = app.client();
    client.signed_up("alice", "pw123").await;

    let form = client.get("/updateuser/").await;
    assert_eq!(form.body["data"]["username"], "alice");
    assert_eq!(form.body["data"]["birth_date"], "1990-01-01");

    let underage = client
        .post(
            "/updateuser/",
            &[
                ("username", "alice"),
                ("first_name", "Alice"),
                ("last_name", "Liddell"),
                ("email", "alice@example.com"),
                ("birth_date", "2020-01-01"),
            ],
        )
        .await;
    assert_eq!(underage.status, StatusCode::UNPROCESSABLE_ENTITY);

    let updated = client
        .post(
            "/updateuser/",
            &[
                ("username", "alice2"),
                ("first_name", "Alice"),
                ("last_name", "Liddell"),
                ("email", "alice@example.org"),
                ("birth_date", "1991-02-03"),
            ],
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["username"], "alice2");

    let user = app
        .store
        .find_user_by_username("alice2")
        .await
        .expect("lookup")
        .expect("renamed");
    assert_eq!(user.email, "alice@example.org");

    // Still logged in under the new name.
    let dashboard = client.get("/logged/").await;
    assert_eq!(dashboard.body["data"]["account"]["username"], "alice2");
}

#[tokio::test]
async fn account_update_cannot_take_another_username() {
    let app = test_app();
    let mut bob = app.client();
    bob.register("bob", "pw", "1990-01-01").await;
    let mut alice = app.client();
    alice.signed_up("alice", "pw123").await;

    let response = alice
        .post(
            "/updateuser/",
            &[
                ("username", "bob"),
                ("email", "alice@example.com"),
                ("birth_date", "1990-01-01"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["data"]["errors"]["fields"]["username"].is_array());
}

#[tokio::test]
async fn password_change_keeps_this_session_and_ends_the_others() {
    let app = test_app();
    let mut here = app.client();
    here.signed_up("alice", "pw123").await;
    let mut elsewhere = app.client();
    assert_eq!(elsewhere.login("alice", "pw123").await.status, StatusCode::SEE_OTHER);

    let empty = here.post("/changepassword/", &[("password", "")]).await;
    assert_eq!(empty.status, StatusCode::UNPROCESSABLE_ENTITY);

    let changed = here.post("/changepassword/", &[("password", "new-secret")]).await;
    assert_eq!(changed.status, StatusCode::OK);

    assert_eq!(here.get("/logged/").await.status, StatusCode::OK);
    let stale = elsewhere.get("/logged/").await;
    assert_eq!(stale.status, StatusCode::SEE_OTHER);
    assert_eq!(stale.location.as_deref(), Some("/login/?next=/logged/"));

    let mut fresh = app.client();
    assert_eq!(fresh.login("alice", "pw123").await.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(fresh.login("alice", "new-secret").await.status, StatusCode::SEE_OTHER);
}
