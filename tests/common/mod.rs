#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use webshop::{
    middleware::session::create_session_layer,
    models::{NewProduct, Product},
    routes::create_app,
    state::AppState,
    store::{InMemoryStore, Store},
};

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

/// The full router over a fresh in-memory store and in-memory sessions.
pub fn test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(store.clone());
    let sessions = create_session_layer(MemoryStore::default(), 60, false);
    TestApp {
        router: create_app(state, sessions),
        store,
    }
}

impl TestApp {
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn product(&self, category_id: i32, name: &str, available: bool) -> Product {
        self.store
            .create_product(NewProduct {
                category_id,
                name: name.to_string(),
                description: None,
                price: Decimal::new(19999, 2),
                picture: None,
                available,
            })
            .await
            .expect("create product")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

/// A browser stand-in that carries the session cookie between requests.
pub struct TestClient {
    router: Router,
    pub cookie: Option<String>,
}

impl TestClient {
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::builder().uri(path).method("GET");
        self.send(request, Body::empty()).await
    }

    pub async fn post(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        let body = serde_urlencoded::to_string(fields).expect("form body");
        self.send(request, Body::from(body)).await
    }

    async fn send(
        &mut self,
        mut request: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie.clone());
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(body).expect("request"))
            .await
            .expect("response");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str().expect("cookie header");
            let pair = set_cookie.split(';').next().unwrap_or_default().trim();
            let removed = pair.ends_with('=') || set_cookie.contains("Max-Age=0");
            self.cookie = if removed { None } else { Some(pair.to_string()) };
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().expect("location").to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            location,
            body,
        }
    }

    pub async fn register(
        &mut self,
        username: &str,
        password: &str,
        birth_date: &str,
    ) -> TestResponse {
        let email = format!("{username}@example.com");
        self.post(
            "/registration/",
            &[
                ("username", username),
                ("password", password),
                ("email", &email),
                ("first_name", "Test"),
                ("last_name", "User"),
                ("birth_date", birth_date),
            ],
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        self.post("/login/", &[("username", username), ("password", password)])
            .await
    }

    /// Registers an adult account and logs in with it.
    pub async fn signed_up(&mut self, username: &str, password: &str) {
        let registered = self.register(username, password, "1990-01-01").await;
        assert_eq!(registered.status, StatusCode::OK, "{}", registered.body);
        let logged_in = self.login(username, password).await;
        assert_eq!(logged_in.status, StatusCode::SEE_OTHER);
    }
}
