pub mod accounts;
pub mod addresses;
pub mod cart;
pub mod catalog;
