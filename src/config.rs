use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub session_ttl_minutes: i64,
    pub secure_cookies: bool,
}

const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24 * 14;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let session_ttl_minutes = env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
        let secure_cookies = env::var("SESSION_SECURE_COOKIE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            port,
            database_url,
            host,
            session_ttl_minutes,
            secure_cookies,
        })
    }
}
