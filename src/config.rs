use serde::Deserialize;

/// Default SQLite file produced by the ETL export.
pub const DEFAULT_DATABASE_PATH: &str = "energy_project.sqlite";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub request_timeout_secs: u64,
    /// Set when running on Railway; only changes the startup banner.
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_path: std::env::var("DATABASE_PATH")
                .or_else(|_| std::env::var("EPC_DATABASE_PATH"))
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
                .trim()
                .to_string(),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive integer"))?,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be a number of seconds"))?,
            is_production: std::env::var("RAILWAY_ENVIRONMENT").is_ok(),
        };

        config.validate()?;

        tracing::debug!("Database path: {}", config.database_path);
        tracing::debug!("Server address: {}:{}", config.host, config.port);
        tracing::debug!("Pool size: {}", config.db_max_connections);

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.database_path.is_empty() {
            anyhow::bail!("DATABASE_PATH cannot be empty");
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }

    /// Address string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
