use crate::{
    auth::Identity,
    dto::catalog::{CategoryLink, CategoryPage, CommentForm, HomePage, ProductPage},
    error::{AppError, AppResult},
    models::CategorySection,
    response::ApiResponse,
    store::Store,
};

pub async fn home(store: &dyn Store, identity: &Identity) -> AppResult<ApiResponse<HomePage>> {
    let categories = store
        .list_categories()
        .await?
        .into_iter()
        .map(CategoryLink::from)
        .collect();
    Ok(ApiResponse::success(
        "OK",
        HomePage {
            username: identity.user().map(|user| user.username.clone()),
            categories,
        },
    ))
}

/// Every product of the section's fixed category, unavailable ones included.
pub async fn category(
    store: &dyn Store,
    section: CategorySection,
) -> AppResult<ApiResponse<CategoryPage>> {
    let category_id = section.category_id();
    let products = store.list_products_in_category(category_id).await?;
    Ok(ApiResponse::success(
        "OK",
        CategoryPage {
            section,
            category_id,
            products,
        },
    ))
}

pub async fn product(store: &dyn Store, product_id: i32) -> AppResult<ApiResponse<ProductPage>> {
    product_page(store, product_id, CommentForm::default()).await
}

/// Product page carrying `comment_form` as submitted.
pub(crate) async fn product_page(
    store: &dyn Store,
    product_id: i32,
    comment_form: CommentForm,
) -> AppResult<ApiResponse<ProductPage>> {
    let product = store
        .get_product(product_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let comments = store.list_comments(product_id).await?;
    Ok(ApiResponse::success(
        "OK",
        ProductPage {
            product,
            comments,
            comment_form,
        },
    ))
}
