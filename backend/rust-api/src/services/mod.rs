use crate::config::{Config, StorageBackend};
use crate::store::{InMemoryStore, MongoStore, QuestionStore};
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn QuestionStore>,
    /// Random source for quiz draws; seedable so tests can pin it
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn QuestionStore> = match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory question store; data is lost on restart");
                Arc::new(InMemoryStore::new())
            }
            StorageBackend::Mongo => {
                tracing::info!("Attempting to connect to MongoDB...");
                let store = MongoStore::connect(&config.mongo_uri, &config.mongo_database)
                    .await
                    .context("Failed to create MongoDB client")?;

                tokio::time::timeout(std::time::Duration::from_secs(5), store.ping())
                    .await
                    .map_err(|_| anyhow::anyhow!("MongoDB ping timeout after 5s"))?
                    .context("MongoDB ping failed")?;

                tracing::info!("MongoDB connection established successfully");
                Arc::new(store)
            }
        };

        if config.seed_categories {
            category_seed::bootstrap(store.as_ref())
                .await
                .context("Failed to seed categories")?;
        }

        Ok(Self::with_store(config, store, StdRng::from_os_rng()))
    }

    pub fn with_store(config: Config, store: Arc<dyn QuestionStore>, rng: StdRng) -> Self {
        Self {
            config,
            store,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

pub mod category_seed;
pub mod question_filters;
pub mod question_service;
pub mod quiz_selector;
