use crate::{
    auth::UserIdentity,
    dto::cart::CartPage,
    error::{AppError, AppResult},
    models::CartLine,
    response::ApiResponse,
    store::Store,
};

/// Lines are never merged; every add creates a line of quantity one.
pub async fn add_to_cart(
    store: &dyn Store,
    user: &UserIdentity,
    product_id: i32,
) -> AppResult<CartLine> {
    if store.get_product(product_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let line = store.create_cart_line(user.user_id, product_id, 1).await?;

    tracing::info!(user_id = user.user_id, product_id, line_id = line.id, "added to cart");
    Ok(line)
}

pub async fn remove_from_cart(
    store: &dyn Store,
    user: &UserIdentity,
    line_id: i32,
) -> AppResult<()> {
    if !store.delete_open_cart_line(user.user_id, line_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = user.user_id, line_id, "removed from cart");
    Ok(())
}

pub async fn view_cart(store: &dyn Store, user: &UserIdentity) -> AppResult<ApiResponse<CartPage>> {
    let lines = store.list_open_cart(user.user_id).await?;
    Ok(ApiResponse::success("OK", CartPage::new(lines)))
}
