pub mod addresses;
pub mod cart_lines;
pub mod categories;
pub mod comments;
pub mod order_lines;
pub mod orders;
pub mod profiles;
pub mod products;
pub mod users;

pub use addresses::Entity as Addresses;
pub use cart_lines::Entity as CartLines;
pub use categories::Entity as Categories;
pub use comments::Entity as Comments;
pub use order_lines::Entity as OrderLines;
pub use orders::Entity as Orders;
pub use profiles::Entity as Profiles;
pub use products::Entity as Products;
pub use users::Entity as Users;
