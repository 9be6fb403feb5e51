use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Address {
    pub id: i32,
    pub profile_id: i32,
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "199.99")]
    pub price: Decimal,
    pub picture: Option<String>,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub order_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A cart line together with the product it points at.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartEntry {
    pub line: CartLine,
    pub product: Product,
}

/// An order and the cart lines it snapshotted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<CartEntry>,
}

/// A comment with its author's username for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentEntry {
    pub comment: Comment,
    pub author: String,
}

/// Catalog sections routed by fixed category identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategorySection {
    Cpu,
    Gpu,
    Motherboards,
}

impl CategorySection {
    pub const ALL: [CategorySection; 3] = [Self::Cpu, Self::Gpu, Self::Motherboards];

    pub fn category_id(self) -> i32 {
        match self {
            Self::Cpu => 1,
            Self::Gpu => 2,
            Self::Motherboards => 3,
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Motherboards => "Motherboard",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Cpu => "/category/cpu/",
            Self::Gpu => "/category/gpu/",
            Self::Motherboards => "/category/motherboards/",
        }
    }
}

/// Input for creating a user together with its profile.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

/// Editable account fields; applied to the user and profile in one step.
#[derive(Debug, Clone)]
pub struct AccountChanges {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressFields {
    pub name: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub zip_code: String,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub picture: Option<String>,
    pub available: bool,
}
