use chrono::NaiveDate;
use rust_decimal::Decimal;
use webshop::{
    auth::{self, Identity, UserIdentity},
    dto::{
        accounts::{LoginForm, RegistrationForm, UpdateUserForm},
        addresses::AddressForm,
        catalog::CommentForm,
    },
    error::AppError,
    models::{CategorySection, NewProduct},
    services::{
        account_service, address_service, cart_service, catalog_service, comment_service,
        order_service,
    },
    store::{InMemoryStore, Store},
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn registration(username: &str, birth_date: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.into(),
        password: "pw123".into(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        birth_date: birth_date.into(),
    }
}

async fn member(store: &InMemoryStore, username: &str) -> UserIdentity {
    account_service::register_on(store, registration(username, "1990-01-01"), ymd(2024, 1, 1))
        .await
        .expect("register");
    auth::authenticate(store, username, "pw123")
        .await
        .expect("authenticate")
        .expect("credentials match")
}

#[tokio::test]
async fn eighteenth_birthday_is_the_first_day_registration_works() {
    let store = InMemoryStore::new();
    let today = ymd(2024, 6, 15);

    let day_before = account_service::register_on(&store, registration("a", "2006-06-16"), today)
        .await
        .unwrap_err();
    assert!(day_before.field_errors().expect("field errors").has("birth_date"));

    account_service::register_on(&store, registration("b", "2006-06-15"), today)
        .await
        .expect("exactly eighteen");
}

#[tokio::test]
async fn every_invalid_field_is_reported_together() {
    let store = InMemoryStore::new();
    let form = RegistrationForm {
        username: " ".into(),
        password: String::new(),
        email: "nope".into(),
        first_name: String::new(),
        last_name: String::new(),
        birth_date: "yesterday".into(),
    };

    let err = account_service::register_on(&store, form, ymd(2024, 1, 1))
        .await
        .unwrap_err();
    let errors = err.field_errors().expect("field errors");
    for field in ["username", "password", "email", "birth_date"] {
        assert!(errors.has(field), "{field}");
    }
    assert!(store.find_user_by_username("").await.expect("lookup").is_none());
}

#[tokio::test]
async fn login_returns_the_user_to_bind() {
    let store = InMemoryStore::new();
    let alice = member(&store, "alice").await;

    let user = account_service::login(
        &store,
        LoginForm {
            username: "alice".into(),
            password: "pw123".into(),
        },
    )
    .await
    .expect("login");
    assert_eq!(user.id, alice.user_id);

    let err = account_service::login(
        &store,
        LoginForm {
            username: "alice".into(),
            password: "wrong".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials(_)));
}

#[tokio::test]
async fn update_account_rejects_underage_birth_date() {
    let store = InMemoryStore::new();
    let alice = member(&store, "alice").await;

    let form = UpdateUserForm {
        username: "alice".into(),
        first_name: String::new(),
        last_name: String::new(),
        email: "alice@example.com".into(),
        birth_date: "2010-01-01".into(),
    };
    let err = account_service::update_account_on(&store, &alice, form, ymd(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(err.field_errors().expect("field errors").has("birth_date"));

    let profile = store.find_profile(alice.user_id).await.expect("lookup").expect("profile");
    assert_eq!(profile.birth_date, ymd(1990, 1, 1));
}

#[tokio::test]
async fn addresses_are_scoped_to_the_callers_profile() {
    let store = InMemoryStore::new();
    let alice = member(&store, "alice").await;
    let bob = member(&store, "bob").await;

    let form = AddressForm {
        name: "Home".into(),
        country: "pl".into(),
        city: "Warsaw".into(),
        address: "Main 1".into(),
        zip_code: "00-001".into(),
    };
    let created = address_service::add_address(&store, &bob, form)
        .await
        .expect("add")
        .data
        .expect("address");
    assert_eq!(created.country, "PL");

    let err = address_service::delete_address(&store, &alice, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    address_service::get_address(&store, &bob, created.id)
        .await
        .expect("still there");
}

#[tokio::test]
async fn account_without_profile_has_no_address_book() {
    let store = InMemoryStore::new();
    let identity = UserIdentity {
        user_id: 1,
        username: "ghost".into(),
        profile_id: None,
    };

    let err = address_service::get_address(&store, &identity, 1).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn cart_to_order_flow_with_explicit_identities() {
    let store = InMemoryStore::new();
    let alice = member(&store, "alice").await;
    let bob = member(&store, "bob").await;
    let product = store
        .create_product(NewProduct {
            category_id: CategorySection::Gpu.category_id(),
            name: "Radeon".into(),
            description: Some("16 GB".into()),
            price: Decimal::new(249900, 2),
            picture: None,
            available: true,
        })
        .await
        .expect("product");

    cart_service::add_to_cart(&store, &alice, product.id).await.expect("add");
    cart_service::add_to_cart(&store, &bob, product.id).await.expect("add");

    let placed = order_service::place_order(&store, &alice)
        .await
        .expect("order")
        .data
        .expect("details");
    assert_eq!(placed.lines.len(), 1);
    assert_eq!(placed.order.user_id, alice.user_id);

    // Bob's cart is untouched by Alice's order.
    let bobs_cart = cart_service::view_cart(&store, &bob)
        .await
        .expect("cart")
        .data
        .expect("page");
    assert_eq!(bobs_cart.lines.len(), 1);
    assert_eq!(bobs_cart.total, Decimal::new(249900, 2));

    let again = order_service::place_order(&store, &alice).await.unwrap_err();
    assert!(again.field_errors().expect("field errors").non_field.len() == 1);

    let orders = order_service::view_orders(&store, &alice)
        .await
        .expect("orders")
        .data
        .expect("page");
    assert_eq!(orders.orders.len(), 1);
    assert!(orders.cart.lines.is_empty());
}

#[tokio::test]
async fn comments_render_on_the_product_page() {
    let store = InMemoryStore::new();
    let alice = member(&store, "alice").await;
    let product = store
        .create_product(NewProduct {
            category_id: 1,
            name: "Ryzen".into(),
            description: None,
            price: Decimal::new(99900, 2),
            picture: None,
            available: false,
        })
        .await
        .expect("product");

    comment_service::add_comment(
        &store,
        &alice,
        product.id,
        CommentForm {
            text: "  fast  ".into(),
        },
    )
    .await
    .expect("comment");

    let page = catalog_service::product(&store, product.id)
        .await
        .expect("page")
        .data
        .expect("product page");
    assert_eq!(page.comments.len(), 1);
    assert_eq!(page.comments[0].comment.text, "fast");

    let home = catalog_service::home(&store, &Identity::Anonymous)
        .await
        .expect("home")
        .data
        .expect("home page");
    assert!(home.username.is_none());
    assert_eq!(home.categories.len(), 3);
}
