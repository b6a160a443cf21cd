//! Environment-driven configuration.

/// Runtime configuration, read once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds.
    pub bind_addr: String,
    /// Postgres connection string; in-memory storage when absent.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let database_url = std::env::var("DATABASE_URL").ok();
        Self {
            bind_addr,
            database_url,
        }
    }
}
