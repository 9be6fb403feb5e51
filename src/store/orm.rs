use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{LockType, Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{
        addresses::{
            ActiveModel as AddressActive, Column as AddressCol, Entity as Addresses,
            Model as AddressModel,
        },
        cart_lines::{
            ActiveModel as CartLineActive, Column as CartCol, Entity as CartLines,
            Model as CartLineModel,
        },
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        comments::{
            ActiveModel as CommentActive, Column as CommentCol, Entity as Comments,
            Model as CommentModel,
        },
        order_lines::{ActiveModel as OrderLineActive, Column as OrderLineCol, Entity as OrderLines},
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        },
        products::{
            ActiveModel as ProductActive, Column as ProdCol, Entity as Products,
            Model as ProductModel,
        },
        profiles::{
            ActiveModel as ProfileActive, Column as ProfileCol, Entity as Profiles,
            Model as ProfileModel,
        },
        users::{
            ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel,
        },
    },
    models::{
        AccountChanges, Address, AddressFields, CartEntry, CartLine, Category, Comment,
        CommentEntry, NewAccount, NewProduct, Order, OrderDetails, Product, Profile, User,
    },
    store::{Store, StoreError, StoreResult},
};

/// Postgres-backed store over a SeaORM connection.
#[derive(Clone)]
pub struct OrmStore {
    orm: DatabaseConnection,
}

impl OrmStore {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.orm
    }
}

/// Cart lines that no order references yet.
fn open_lines() -> SimpleExpr {
    CartCol::Id.not_in_subquery(
        Query::select()
            .column(OrderLineCol::CartLineId)
            .from(OrderLines)
            .to_owned(),
    )
}

fn username_taken_by_other(username: &str, user_id: i32) -> Condition {
    Condition::all()
        .add(UserCol::Username.eq(username))
        .add(UserCol::Id.ne(user_id))
}

#[async_trait]
impl Store for OrmStore {
    async fn ping(&self) -> StoreResult<()> {
        self.orm.ping().await?;
        Ok(())
    }

    async fn create_account(&self, account: NewAccount) -> StoreResult<(User, Profile)> {
        let txn = self.orm.begin().await?;

        let exist = Users::find()
            .filter(UserCol::Username.eq(account.username.as_str()))
            .one(&txn)
            .await?;
        if exist.is_some() {
            return Err(StoreError::Conflict("username"));
        }

        let user = UserActive {
            id: NotSet,
            username: Set(account.username),
            password_hash: Set(account.password_hash),
            email: Set(account.email),
            first_name: Set(account.first_name),
            last_name: Set(account.last_name),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        let profile = ProfileActive {
            id: NotSet,
            user_id: Set(user.id),
            birth_date: Set(account.birth_date),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok((user_from_entity(user), profile_from_entity(profile)))
    }

    async fn get_user(&self, user_id: i32) -> StoreResult<Option<User>> {
        let user = Users::find_by_id(user_id).one(&self.orm).await?;
        Ok(user.map(user_from_entity))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = Users::find()
            .filter(UserCol::Username.eq(username))
            .one(&self.orm)
            .await?;
        Ok(user.map(user_from_entity))
    }

    async fn find_profile(&self, user_id: i32) -> StoreResult<Option<Profile>> {
        let profile = Profiles::find()
            .filter(ProfileCol::UserId.eq(user_id))
            .one(&self.orm)
            .await?;
        Ok(profile.map(profile_from_entity))
    }

    async fn update_account(
        &self,
        user_id: i32,
        changes: AccountChanges,
    ) -> StoreResult<Option<(User, Profile)>> {
        let txn = self.orm.begin().await?;

        let Some(user) = Users::find_by_id(user_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };
        let Some(profile) = Profiles::find()
            .filter(ProfileCol::UserId.eq(user_id))
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let taken = Users::find()
            .filter(username_taken_by_other(&changes.username, user_id))
            .one(&txn)
            .await?;
        if taken.is_some() {
            return Err(StoreError::Conflict("username"));
        }

        let mut active: UserActive = user.into();
        active.username = Set(changes.username);
        active.email = Set(changes.email);
        active.first_name = Set(changes.first_name);
        active.last_name = Set(changes.last_name);
        let user = active.update(&txn).await?;

        let mut active: ProfileActive = profile.into();
        active.birth_date = Set(changes.birth_date);
        let profile = active.update(&txn).await?;

        txn.commit().await?;

        Ok(Some((user_from_entity(user), profile_from_entity(profile))))
    }

    async fn set_password_hash(
        &self,
        user_id: i32,
        password_hash: String,
    ) -> StoreResult<Option<User>> {
        let Some(user) = Users::find_by_id(user_id).one(&self.orm).await? else {
            return Ok(None);
        };
        let mut active: UserActive = user.into();
        active.password_hash = Set(password_hash);
        let user = active.update(&self.orm).await?;
        Ok(Some(user_from_entity(user)))
    }

    async fn create_address(&self, profile_id: i32, fields: AddressFields) -> StoreResult<Address> {
        let address = AddressActive {
            id: NotSet,
            profile_id: Set(profile_id),
            name: Set(fields.name),
            country: Set(fields.country),
            city: Set(fields.city),
            address: Set(fields.address),
            zip_code: Set(fields.zip_code),
        }
        .insert(&self.orm)
        .await?;
        Ok(address_from_entity(address))
    }

    async fn list_addresses(&self, profile_id: i32) -> StoreResult<Vec<Address>> {
        let addresses = Addresses::find()
            .filter(AddressCol::ProfileId.eq(profile_id))
            .order_by_asc(AddressCol::Name)
            .order_by_asc(AddressCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(address_from_entity)
            .collect();
        Ok(addresses)
    }

    async fn find_address(
        &self,
        profile_id: i32,
        address_id: i32,
    ) -> StoreResult<Option<Address>> {
        let address = find_owned_address(&self.orm, profile_id, address_id).await?;
        Ok(address.map(address_from_entity))
    }

    async fn update_address(
        &self,
        profile_id: i32,
        address_id: i32,
        fields: AddressFields,
    ) -> StoreResult<Option<Address>> {
        let Some(address) = find_owned_address(&self.orm, profile_id, address_id).await? else {
            return Ok(None);
        };
        let mut active: AddressActive = address.into();
        active.name = Set(fields.name);
        active.country = Set(fields.country);
        active.city = Set(fields.city);
        active.address = Set(fields.address);
        active.zip_code = Set(fields.zip_code);
        let address = active.update(&self.orm).await?;
        Ok(Some(address_from_entity(address)))
    }

    async fn delete_address(&self, profile_id: i32, address_id: i32) -> StoreResult<bool> {
        let result = Addresses::delete_many()
            .filter(
                Condition::all()
                    .add(AddressCol::ProfileId.eq(profile_id))
                    .add(AddressCol::Id.eq(address_id)),
            )
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let categories = Categories::find()
            .order_by_asc(CategoryCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(category_from_entity)
            .collect();
        Ok(categories)
    }

    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let product = ProductActive {
            id: NotSet,
            category_id: Set(product.category_id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            picture: Set(product.picture),
            available: Set(product.available),
        }
        .insert(&self.orm)
        .await?;
        Ok(product_from_entity(product))
    }

    async fn get_product(&self, product_id: i32) -> StoreResult<Option<Product>> {
        let product = Products::find_by_id(product_id).one(&self.orm).await?;
        Ok(product.map(product_from_entity))
    }

    async fn list_products_in_category(&self, category_id: i32) -> StoreResult<Vec<Product>> {
        let products = Products::find()
            .filter(ProdCol::CategoryId.eq(category_id))
            .order_by_asc(ProdCol::Id)
            .all(&self.orm)
            .await?
            .into_iter()
            .map(product_from_entity)
            .collect();
        Ok(products)
    }

    async fn create_cart_line(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> StoreResult<CartLine> {
        let line = CartLineActive {
            id: NotSet,
            user_id: Set(user_id),
            product_id: Set(product_id),
            quantity: Set(quantity),
        }
        .insert(&self.orm)
        .await?;
        Ok(cart_line_from_entity(line))
    }

    async fn list_open_cart(&self, user_id: i32) -> StoreResult<Vec<CartEntry>> {
        let rows = CartLines::find()
            .filter(CartCol::UserId.eq(user_id))
            .filter(open_lines())
            .order_by_asc(CartCol::Id)
            .find_also_related(Products)
            .all(&self.orm)
            .await?;

        let entries = rows
            .into_iter()
            .filter_map(|(line, product)| {
                product.map(|product| CartEntry {
                    line: cart_line_from_entity(line),
                    product: product_from_entity(product),
                })
            })
            .collect();
        Ok(entries)
    }

    async fn delete_open_cart_line(&self, user_id: i32, line_id: i32) -> StoreResult<bool> {
        let result = CartLines::delete_many()
            .filter(CartCol::Id.eq(line_id))
            .filter(CartCol::UserId.eq(user_id))
            .filter(open_lines())
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn place_order(&self, user_id: i32) -> StoreResult<OrderDetails> {
        let txn = self.orm.begin().await?;

        // serialize concurrent checkouts of the same user
        let owner = Users::find_by_id(user_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        if owner.is_none() {
            return Err(StoreError::MissingReference("user"));
        }

        let lines = CartLines::find()
            .filter(CartCol::UserId.eq(user_id))
            .filter(open_lines())
            .order_by_asc(CartCol::Id)
            .all(&txn)
            .await?;
        if lines.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let order = OrderActive {
            id: NotSet,
            user_id: Set(user_id),
            order_id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await?;

        OrderLines::insert_many(lines.iter().map(|line| OrderLineActive {
            order_id: Set(order.id),
            cart_line_id: Set(line.id),
        }))
        .exec_without_returning(&txn)
        .await?;

        let lines = attach_products(&txn, lines).await?;

        txn.commit().await?;

        Ok(OrderDetails {
            order: order_from_entity(order),
            lines,
        })
    }

    async fn list_orders(&self, user_id: i32) -> StoreResult<Vec<OrderDetails>> {
        let orders = Orders::find()
            .filter(OrderCol::UserId.eq(user_id))
            .order_by_desc(OrderCol::CreatedAt)
            .order_by_desc(OrderCol::Id)
            .all(&self.orm)
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
        let links = OrderLines::find()
            .filter(OrderLineCol::OrderId.is_in(order_ids))
            .find_also_related(CartLines)
            .all(&self.orm)
            .await?;

        let mut lines_by_order: HashMap<i32, Vec<CartLineModel>> = HashMap::new();
        for (link, line) in links {
            if let Some(line) = line {
                lines_by_order.entry(link.order_id).or_default().push(line);
            }
        }

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            let mut lines = lines_by_order.remove(&order.id).unwrap_or_default();
            lines.sort_by_key(|line| line.id);
            details.push(OrderDetails {
                lines: attach_products(&self.orm, lines).await?,
                order: order_from_entity(order),
            });
        }
        Ok(details)
    }

    async fn create_comment(
        &self,
        user_id: i32,
        product_id: i32,
        text: String,
    ) -> StoreResult<Comment> {
        let comment = CommentActive {
            id: NotSet,
            user_id: Set(user_id),
            product_id: Set(product_id),
            text: Set(text),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.orm)
        .await?;
        Ok(comment_from_entity(comment))
    }

    async fn list_comments(&self, product_id: i32) -> StoreResult<Vec<CommentEntry>> {
        let rows = Comments::find()
            .filter(CommentCol::ProductId.eq(product_id))
            .order_by_desc(CommentCol::CreatedAt)
            .order_by_desc(CommentCol::Id)
            .find_also_related(Users)
            .all(&self.orm)
            .await?;

        let entries = rows
            .into_iter()
            .map(|(comment, author)| CommentEntry {
                comment: comment_from_entity(comment),
                author: author.map(|user| user.username).unwrap_or_default(),
            })
            .collect();
        Ok(entries)
    }

    async fn delete_comment(&self, user_id: i32, comment_id: i32) -> StoreResult<bool> {
        let result = Comments::delete_many()
            .filter(
                Condition::all()
                    .add(CommentCol::Id.eq(comment_id))
                    .add(CommentCol::UserId.eq(user_id)),
            )
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

async fn find_owned_address<C: ConnectionTrait>(
    db: &C,
    profile_id: i32,
    address_id: i32,
) -> StoreResult<Option<AddressModel>> {
    let address = Addresses::find()
        .filter(
            Condition::all()
                .add(AddressCol::ProfileId.eq(profile_id))
                .add(AddressCol::Id.eq(address_id)),
        )
        .one(db)
        .await?;
    Ok(address)
}

async fn attach_products<C: ConnectionTrait>(
    db: &C,
    lines: Vec<CartLineModel>,
) -> StoreResult<Vec<CartEntry>> {
    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();
    let products: HashMap<i32, ProductModel> = Products::find()
        .filter(ProdCol::Id.is_in(product_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let entries = lines
        .into_iter()
        .filter_map(|line| {
            let product = products.get(&line.product_id)?.clone();
            Some(CartEntry {
                line: cart_line_from_entity(line),
                product: product_from_entity(product),
            })
        })
        .collect();
    Ok(entries)
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        password_hash: model.password_hash,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn profile_from_entity(model: ProfileModel) -> Profile {
    Profile {
        id: model.id,
        user_id: model.user_id,
        birth_date: model.birth_date,
    }
}

fn address_from_entity(model: AddressModel) -> Address {
    Address {
        id: model.id,
        profile_id: model.profile_id,
        name: model.name,
        country: model.country,
        city: model.city,
        address: model.address,
        zip_code: model.zip_code,
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
    }
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        category_id: model.category_id,
        name: model.name,
        description: model.description,
        price: model.price,
        picture: model.picture,
        available: model.available,
    }
}

fn cart_line_from_entity(model: CartLineModel) -> CartLine {
    CartLine {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        quantity: model.quantity,
    }
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        order_id: model.order_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn comment_from_entity(model: CommentModel) -> Comment {
    Comment {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        text: model.text,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
