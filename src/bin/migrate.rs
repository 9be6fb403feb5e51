use tower_sessions_sqlx_store::PostgresStore;
use webshop::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
};

/// Applies the schema migrations and creates the session table.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    run_migrations(&orm).await?;
    println!("Schema migrations applied");

    PostgresStore::new(orm.get_postgres_connection_pool().clone())
        .migrate()
        .await?;
    println!("Session store ready");
    Ok(())
}
