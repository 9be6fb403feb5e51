use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    auth::session::SESSION_COOKIE_NAME,
    dto::{
        accounts::{AccountView, Dashboard, RegistrationForm},
        addresses::{AddressEditPage, AddressForm},
        cart::{CartPage, OrdersPage},
        catalog::{CategoryLink, CategoryPage, CommentForm, HomePage, ProductPage},
    },
    error::FormRejection,
    models::{
        Address, CartEntry, CartLine, Category, CategorySection, Comment, CommentEntry, Order,
        OrderDetails, Product, Profile, User,
    },
    response::ApiResponse,
    routes::{accounts, addresses, cart, catalog, health, home},
    validation::FieldErrors,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        home::home,
        accounts::registration_form,
        accounts::register,
        accounts::login_form,
        accounts::login,
        accounts::logout,
        accounts::dashboard,
        accounts::account_form,
        accounts::update_account,
        accounts::change_password_form,
        accounts::change_password,
        addresses::get_address,
        addresses::delete_address,
        addresses::new_address_form,
        addresses::add_address,
        addresses::address_form,
        addresses::update_address,
        catalog::cpu_category,
        catalog::gpu_category,
        catalog::motherboard_category,
        catalog::product,
        catalog::add_comment,
        catalog::remove_comment,
        cart::view_cart,
        cart::place_order,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::view_orders
    ),
    components(
        schemas(
            User,
            Profile,
            Address,
            Category,
            CategorySection,
            Product,
            CartLine,
            CartEntry,
            Order,
            OrderDetails,
            Comment,
            CommentEntry,
            FieldErrors,
            FormRejection,
            RegistrationForm,
            AccountView,
            Dashboard,
            AddressForm,
            AddressEditPage,
            CategoryLink,
            HomePage,
            CategoryPage,
            CommentForm,
            ProductPage,
            CartPage,
            OrdersPage,
            ApiResponse<Dashboard>,
            ApiResponse<ProductPage>,
            ApiResponse<CartPage>,
            ApiResponse<FormRejection>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Accounts", description = "Registration, login and account pages"),
        (name = "Addresses", description = "Address book of the logged-in user"),
        (name = "Catalog", description = "Home page, categories and products"),
        (name = "Comments", description = "Product comments"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
