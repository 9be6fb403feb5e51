use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    models::{
        AccountChanges, Address, AddressFields, CartEntry, CartLine, Category, CategorySection,
        Comment, CommentEntry, NewAccount, NewProduct, Order, OrderDetails, Product, Profile, User,
    },
    store::{Store, StoreError, StoreResult},
};

/// Process-local store with the same relational rules as the database
/// schema. Each operation holds the lock for its full duration, so
/// multi-row writes are atomic.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: BTreeMap<i32, User>,
    profiles: BTreeMap<i32, Profile>,
    addresses: BTreeMap<i32, Address>,
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    cart_lines: BTreeMap<i32, CartLine>,
    orders: BTreeMap<i32, Order>,
    /// (order id, cart line id)
    order_lines: Vec<(i32, i32)>,
    comments: BTreeMap<i32, Comment>,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn is_open(&self, line_id: i32) -> bool {
        !self.order_lines.iter().any(|(_, linked)| *linked == line_id)
    }

    fn entries(&self, lines: impl IntoIterator<Item = CartLine>) -> Vec<CartEntry> {
        lines
            .into_iter()
            .filter_map(|line| {
                let product = self.products.get(&line.product_id)?.clone();
                Some(CartEntry { line, product })
            })
            .collect()
    }

    fn order_details(&self, order: &Order) -> OrderDetails {
        let mut line_ids: Vec<i32> = self
            .order_lines
            .iter()
            .filter(|(order_id, _)| *order_id == order.id)
            .map(|(_, line_id)| *line_id)
            .collect();
        line_ids.sort_unstable();
        let lines = line_ids
            .iter()
            .filter_map(|id| self.cart_lines.get(id).cloned());
        OrderDetails {
            order: order.clone(),
            lines: self.entries(lines),
        }
    }
}

impl InMemoryStore {
    /// Empty store seeded with the fixed catalog categories.
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for section in CategorySection::ALL {
            let id = section.category_id();
            tables.categories.insert(
                id,
                Category {
                    id,
                    name: section.default_name().to_string(),
                },
            );
        }
        tables.next_id = CategorySection::ALL.len() as i32;
        Self {
            tables: Mutex::new(tables),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_account(&self, account: NewAccount) -> StoreResult<(User, Profile)> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.username == account.username) {
            return Err(StoreError::Conflict("username"));
        }

        let user = User {
            id: tables.allocate_id(),
            username: account.username,
            password_hash: account.password_hash,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            created_at: Utc::now(),
        };
        let profile = Profile {
            id: tables.allocate_id(),
            user_id: user.id,
            birth_date: account.birth_date,
        };
        tables.users.insert(user.id, user.clone());
        tables.profiles.insert(profile.id, profile.clone());
        Ok((user, profile))
    }

    async fn get_user(&self, user_id: i32) -> StoreResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_profile(&self, user_id: i32) -> StoreResult<Option<Profile>> {
        let tables = self.tables.lock().await;
        Ok(tables.profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn update_account(
        &self,
        user_id: i32,
        changes: AccountChanges,
    ) -> StoreResult<Option<(User, Profile)>> {
        let mut tables = self.tables.lock().await;
        let Some(profile_id) = tables
            .profiles
            .values()
            .find(|p| p.user_id == user_id)
            .map(|p| p.id)
        else {
            return Ok(None);
        };
        if !tables.users.contains_key(&user_id) {
            return Ok(None);
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user_id && u.username == changes.username)
        {
            return Err(StoreError::Conflict("username"));
        }

        let Some(user) = tables.users.get_mut(&user_id) else {
            return Ok(None);
        };
        user.username = changes.username;
        user.email = changes.email;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        let user = user.clone();

        let Some(profile) = tables.profiles.get_mut(&profile_id) else {
            return Ok(None);
        };
        profile.birth_date = changes.birth_date;
        Ok(Some((user, profile.clone())))
    }

    async fn set_password_hash(
        &self,
        user_id: i32,
        password_hash: String,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.users.get_mut(&user_id).map(|user| {
            user.password_hash = password_hash;
            user.clone()
        }))
    }

    async fn create_address(&self, profile_id: i32, fields: AddressFields) -> StoreResult<Address> {
        let mut tables = self.tables.lock().await;
        if !tables.profiles.contains_key(&profile_id) {
            return Err(StoreError::MissingReference("profile"));
        }
        let address = Address {
            id: tables.allocate_id(),
            profile_id,
            name: fields.name,
            country: fields.country,
            city: fields.city,
            address: fields.address,
            zip_code: fields.zip_code,
        };
        tables.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn list_addresses(&self, profile_id: i32) -> StoreResult<Vec<Address>> {
        let tables = self.tables.lock().await;
        let mut addresses: Vec<Address> = tables
            .addresses
            .values()
            .filter(|a| a.profile_id == profile_id)
            .cloned()
            .collect();
        addresses.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(addresses)
    }

    async fn find_address(
        &self,
        profile_id: i32,
        address_id: i32,
    ) -> StoreResult<Option<Address>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .addresses
            .get(&address_id)
            .filter(|a| a.profile_id == profile_id)
            .cloned())
    }

    async fn update_address(
        &self,
        profile_id: i32,
        address_id: i32,
        fields: AddressFields,
    ) -> StoreResult<Option<Address>> {
        let mut tables = self.tables.lock().await;
        let Some(address) = tables
            .addresses
            .get_mut(&address_id)
            .filter(|a| a.profile_id == profile_id)
        else {
            return Ok(None);
        };
        address.name = fields.name;
        address.country = fields.country;
        address.city = fields.city;
        address.address = fields.address;
        address.zip_code = fields.zip_code;
        Ok(Some(address.clone()))
    }

    async fn delete_address(&self, profile_id: i32, address_id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let owned = tables
            .addresses
            .get(&address_id)
            .is_some_and(|a| a.profile_id == profile_id);
        if owned {
            tables.addresses.remove(&address_id);
        }
        Ok(owned)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.lock().await.categories.values().cloned().collect())
    }

    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let mut tables = self.tables.lock().await;
        if !tables.categories.contains_key(&product.category_id) {
            return Err(StoreError::MissingReference("category"));
        }
        let product = Product {
            id: tables.allocate_id(),
            category_id: product.category_id,
            name: product.name,
            description: product.description,
            price: product.price,
            picture: product.picture,
            available: product.available,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, product_id: i32) -> StoreResult<Option<Product>> {
        Ok(self.tables.lock().await.products.get(&product_id).cloned())
    }

    async fn list_products_in_category(&self, category_id: i32) -> StoreResult<Vec<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn create_cart_line(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<CartLine> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::MissingReference("user"));
        }
        if !tables.products.contains_key(&product_id) {
            return Err(StoreError::MissingReference("product"));
        }
        let line = CartLine {
            id: tables.allocate_id(),
            user_id,
            product_id,
            quantity,
        };
        tables.cart_lines.insert(line.id, line.clone());
        Ok(line)
    }

    async fn list_open_cart(&self, user_id: i32) -> StoreResult<Vec<CartEntry>> {
        let tables = self.tables.lock().await;
        let lines: Vec<CartLine> = tables
            .cart_lines
            .values()
            .filter(|line| line.user_id == user_id && tables.is_open(line.id))
            .cloned()
            .collect();
        Ok(tables.entries(lines))
    }

    async fn delete_open_cart_line(&self, user_id: i32, line_id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let removable = tables
            .cart_lines
            .get(&line_id)
            .is_some_and(|line| line.user_id == user_id)
            && tables.is_open(line_id);
        if removable {
            tables.cart_lines.remove(&line_id);
        }
        Ok(removable)
    }

    async fn place_order(&self, user_id: i32) -> StoreResult<OrderDetails> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::MissingReference("user"));
        }

        let line_ids: Vec<i32> = tables
            .cart_lines
            .values()
            .filter(|line| line.user_id == user_id && tables.is_open(line.id))
            .map(|line| line.id)
            .collect();
        if line_ids.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let order = Order {
            id: tables.allocate_id(),
            user_id,
            order_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        tables.orders.insert(order.id, order.clone());
        tables
            .order_lines
            .extend(line_ids.into_iter().map(|line_id| (order.id, line_id)));
        Ok(tables.order_details(&order))
    }

    async fn list_orders(&self, user_id: i32) -> StoreResult<Vec<OrderDetails>> {
        let tables = self.tables.lock().await;
        let mut orders: Vec<&Order> = tables
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders
            .into_iter()
            .map(|order| tables.order_details(order))
            .collect())
    }

    async fn create_comment(
        &self,
        user_id: i32,
        product_id: i32,
        text: String,
    ) -> StoreResult<Comment> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::MissingReference("user"));
        }
        if !tables.products.contains_key(&product_id) {
            return Err(StoreError::MissingReference("product"));
        }
        let comment = Comment {
            id: tables.allocate_id(),
            user_id,
            product_id,
            text,
            created_at: Utc::now(),
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, product_id: i32) -> StoreResult<Vec<CommentEntry>> {
        let tables = self.tables.lock().await;
        let mut comments: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| c.product_id == product_id)
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments
            .into_iter()
            .map(|comment| CommentEntry {
                comment: comment.clone(),
                author: tables
                    .users
                    .get(&comment.user_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn delete_comment(&self, user_id: i32, comment_id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let owned = tables
            .comments
            .get(&comment_id)
            .is_some_and(|c| c.user_id == user_id);
        if owned {
            tables.comments.remove(&comment_id);
        }
        Ok(owned)
    }
}
