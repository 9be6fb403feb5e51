use crate::{
    auth::UserIdentity,
    dto::cart::{CartPage, OrdersPage},
    error::{AppError, AppResult},
    models::OrderDetails,
    response::ApiResponse,
    store::{Store, StoreError},
    validation::FieldErrors,
};

const EMPTY_CART: &str = "Your cart is empty.";

/// Turns the caller's open cart into an order.
pub async fn place_order(
    store: &dyn Store,
    user: &UserIdentity,
) -> AppResult<ApiResponse<OrderDetails>> {
    let details = match store.place_order(user.user_id).await {
        Ok(details) => details,
        Err(StoreError::EmptyCart) => {
            let cart = CartPage::new(Vec::new());
            return Err(AppError::invalid(&cart, FieldErrors::non_field(EMPTY_CART)));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        user_id = user.user_id,
        order_id = %details.order.order_id,
        lines = details.lines.len(),
        "order placed"
    );
    Ok(ApiResponse::success("Order placed", details))
}

/// Every order of the caller plus whatever is in the cart now.
pub async fn view_orders(
    store: &dyn Store,
    user: &UserIdentity,
) -> AppResult<ApiResponse<OrdersPage>> {
    let orders = store.list_orders(user.user_id).await?;
    let cart = CartPage::new(store.list_open_cart(user.user_id).await?);
    Ok(ApiResponse::success("OK", OrdersPage { orders, cart }))
}
