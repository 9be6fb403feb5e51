use chrono::NaiveDate;
use rust_decimal::Decimal;
use webshop::{
    auth::password::hash_password,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    models::{CategorySection, NewAccount, NewProduct},
    store::{OrmStore, Store},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let store = OrmStore::new(orm);

    let user_id = ensure_user(&store, "demo", "demo123").await?;
    seed_products(&store).await?;

    println!("Seed completed. Demo user ID: {user_id}");
    Ok(())
}

async fn ensure_user(store: &OrmStore, username: &str, password: &str) -> anyhow::Result<i32> {
    if let Some(existing) = store.find_user_by_username(username).await? {
        println!("User {username} already exists");
        return Ok(existing.id);
    }

    let birth_date = NaiveDate::from_ymd_opt(1990, 1, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid seed birth date"))?;
    let (user, _profile) = store
        .create_account(NewAccount {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            email: format!("{username}@example.com"),
            first_name: "Demo".into(),
            last_name: "User".into(),
            birth_date,
        })
        .await?;

    println!("Created user {username}");
    Ok(user.id)
}

async fn seed_products(store: &OrmStore) -> anyhow::Result<()> {
    let products = [
        (CategorySection::Cpu, "Ryzen 7 7800X3D", "8 cores, 96 MB L3", 1799, true),
        (CategorySection::Cpu, "Core i5-14600K", "14 cores, unlocked", 1349, true),
        (CategorySection::Cpu, "Core i9-9900K", "Previous generation", 999, false),
        (CategorySection::Gpu, "Radeon RX 7800 XT", "16 GB GDDR6", 2399, true),
        (CategorySection::Gpu, "GeForce RTX 4070", "12 GB GDDR6X", 2749, true),
        (CategorySection::Motherboards, "B650 Tomahawk", "AM5, ATX", 949, true),
        (CategorySection::Motherboards, "Z790 Aorus Elite", "LGA1700, ATX", 1099, true),
    ];

    for section in CategorySection::ALL {
        if !store
            .list_products_in_category(section.category_id())
            .await?
            .is_empty()
        {
            println!("Category {} already has products", section.default_name());
            continue;
        }
        for (_, name, description, price, available) in
            products.iter().filter(|(s, ..)| *s == section)
        {
            store
                .create_product(NewProduct {
                    category_id: section.category_id(),
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    price: Decimal::from(*price),
                    picture: None,
                    available: *available,
                })
                .await?;
        }
    }

    println!("Seeded products");
    Ok(())
}
