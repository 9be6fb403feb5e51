use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CartEntry, OrderDetails};

#[derive(Debug, Serialize, ToSchema)]
pub struct CartPage {
    pub lines: Vec<CartEntry>,
    #[schema(value_type = String, example = "399.98")]
    pub total: Decimal,
}

impl CartPage {
    pub fn new(lines: Vec<CartEntry>) -> Self {
        let total = cart_total(&lines);
        Self { lines, total }
    }
}

pub fn cart_total(lines: &[CartEntry]) -> Decimal {
    lines
        .iter()
        .map(|entry| entry.product.price * Decimal::from(entry.line.quantity))
        .sum()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersPage {
    /// Newest first.
    pub orders: Vec<OrderDetails>,
    pub cart: CartPage,
}
