//! Data access for every entity, behind one object-safe trait.
//!
//! Ownership-scoped operations take the owner's id alongside the record id
//! and behave as if the record does not exist when the two don't match.

use async_trait::async_trait;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::models::{
    AccountChanges, Address, AddressFields, CartEntry, CartLine, Category, Comment, CommentEntry,
    NewAccount, NewProduct, OrderDetails, Product, Profile, User,
};

pub mod memory;
pub mod orm;

pub use memory::InMemoryStore;
pub use orm::OrmStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write; carries the offending field.
    #[error("unique constraint violated on {0}")]
    Conflict(&'static str),

    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("cart is empty")]
    EmptyCart,

    #[error("ORM error")]
    Orm(#[source] DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("username") => {
                StoreError::Conflict("username")
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict("record"),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                StoreError::MissingReference("record")
            }
            _ => StoreError::Orm(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    /// Creates a user and its profile atomically.
    async fn create_account(&self, account: NewAccount) -> StoreResult<(User, Profile)>;
    async fn get_user(&self, user_id: i32) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn find_profile(&self, user_id: i32) -> StoreResult<Option<Profile>>;
    /// Updates user and profile together; `None` if the user has no profile.
    async fn update_account(
        &self,
        user_id: i32,
        changes: AccountChanges,
    ) -> StoreResult<Option<(User, Profile)>>;
    async fn set_password_hash(&self, user_id: i32, password_hash: String)
    -> StoreResult<Option<User>>;

    async fn create_address(&self, profile_id: i32, fields: AddressFields) -> StoreResult<Address>;
    /// Addresses of one profile ordered by name.
    async fn list_addresses(&self, profile_id: i32) -> StoreResult<Vec<Address>>;
    async fn find_address(&self, profile_id: i32, address_id: i32)
    -> StoreResult<Option<Address>>;
    async fn update_address(
        &self,
        profile_id: i32,
        address_id: i32,
        fields: AddressFields,
    ) -> StoreResult<Option<Address>>;
    async fn delete_address(&self, profile_id: i32, address_id: i32) -> StoreResult<bool>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product>;
    async fn get_product(&self, product_id: i32) -> StoreResult<Option<Product>>;
    /// Every product of a category, available or not.
    async fn list_products_in_category(&self, category_id: i32) -> StoreResult<Vec<Product>>;

    async fn create_cart_line(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<CartLine>;
    /// Lines of the user not yet linked to an order.
    async fn list_open_cart(&self, user_id: i32) -> StoreResult<Vec<CartEntry>>;
    async fn delete_open_cart_line(&self, user_id: i32, line_id: i32) -> StoreResult<bool>;

    /// Creates an order linked to every open cart line of the user, which
    /// leaves the open cart empty. Fails with `EmptyCart` when there is
    /// nothing to order.
    async fn place_order(&self, user_id: i32) -> StoreResult<OrderDetails>;
    /// Orders of the user, newest first.
    async fn list_orders(&self, user_id: i32) -> StoreResult<Vec<OrderDetails>>;

    async fn create_comment(
        &self,
        user_id: i32,
        product_id: i32,
        text: String,
    ) -> StoreResult<Comment>;
    /// Comments of a product, newest first.
    async fn list_comments(&self, product_id: i32) -> StoreResult<Vec<CommentEntry>>;
    async fn delete_comment(&self, user_id: i32, comment_id: i32) -> StoreResult<bool>;
}
