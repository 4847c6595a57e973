use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Mongo,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(StorageBackend::Memory),
            "mongo" | "mongodb" => Some(StorageBackend::Mongo),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Mongo => "mongo",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub storage_backend: StorageBackend,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub seed_categories: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let bind_address = settings
            .get_string("server.address")
            .or_else(|_| env::var("BIND_ADDRESS"))
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let backend_name = settings
            .get_string("storage.backend")
            .or_else(|_| env::var("STORAGE_BACKEND"))
            .unwrap_or_else(|_| "memory".to_string());
        let storage_backend = StorageBackend::parse(&backend_name).ok_or_else(|| {
            config::ConfigError::Message(format!("Unknown storage backend: {}", backend_name))
        })?;

        let mongo_uri = settings
            .get_string("database.mongo_uri")
            .or_else(|_| env::var("MONGO_URI"))
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let mongo_database = settings
            .get_string("database.mongo_database")
            .or_else(|_| env::var("MONGO_DATABASE"))
            .unwrap_or_else(|_| "trivia".to_string());

        let seed_categories = match settings.get_bool("seed.categories") {
            Ok(value) => value,
            Err(_) => env::var("SEED_CATEGORIES")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no"))
                .unwrap_or(true),
        };

        Ok(Config {
            bind_address,
            storage_backend,
            mongo_uri,
            mongo_database,
            seed_categories,
        })
    }

    /// In-memory configuration that never touches the environment
    pub fn for_tests() -> Self {
        Config {
            bind_address: "127.0.0.1:0".to_string(),
            storage_backend: StorageBackend::Memory,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_database: "trivia_test".to_string(),
            seed_categories: true,
        }
    }
}
