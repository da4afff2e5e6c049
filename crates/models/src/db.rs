use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connect using the `[database]` section of config.toml, falling back to the
/// `DATABASE_URL` environment variable when the file has no URL.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    let cfg = configs::AppConfig::load_or_default()?;
    connect_with(&cfg.database).await
}

pub async fn connect_with(cfg: &configs::DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}
