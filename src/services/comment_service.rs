use crate::{
    auth::UserIdentity,
    dto::catalog::CommentForm,
    error::{AppError, AppResult},
    models::Comment,
    services::catalog_service,
    store::Store,
    validation::{self, Validator},
};

/// Adds a comment by the caller. Invalid text re-presents the product page
/// with the submitted form and its errors.
pub async fn add_comment(
    store: &dyn Store,
    user: &UserIdentity,
    product_id: i32,
    form: CommentForm,
) -> AppResult<Comment> {
    if store.get_product(product_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let mut v = Validator::new();
    let Some(text) = v.field("text", validation::required(&form.text)) else {
        let errors = v.into_errors();
        let page = catalog_service::product_page(store, product_id, form).await?;
        return Err(AppError::invalid(&page.data, errors));
    };

    let comment = store.create_comment(user.user_id, product_id, text).await?;
    tracing::info!(
        user_id = user.user_id,
        product_id,
        comment_id = comment.id,
        "comment added"
    );
    Ok(comment)
}

/// Deletes the caller's own comment; anybody else's is not-found.
pub async fn remove_comment(
    store: &dyn Store,
    user: &UserIdentity,
    comment_id: i32,
) -> AppResult<()> {
    if !store.delete_comment(user.user_id, comment_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = user.user_id, comment_id, "comment removed");
    Ok(())
}
