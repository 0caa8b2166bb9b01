//! Application state - shared across all handlers.

use std::sync::Arc;

use serde::Serialize;

use blog_core::{CategoryService, PostService, RetryPolicy};
use blog_infra::InMemoryDatabase;

use crate::config::AppConfig;

/// Where posts and categories are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    Postgres,
    Memory,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub categories: CategoryService,
    pub storage: Storage,
}

impl AppState {
    /// Build the state, preferring Postgres when it is configured and
    /// reachable.
    pub async fn new(config: &AppConfig) -> Self {
        if let Some(state) = Self::postgres(config).await {
            tracing::info!("Application state initialized (postgres)");
            return state;
        }

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(config.retry.clone())
    }

    /// State backed by in-memory repositories. Data is lost on restart.
    pub fn in_memory(retry: RetryPolicy) -> Self {
        let db = InMemoryDatabase::new();
        Self {
            posts: PostService::new(Arc::new(db.posts())).with_retry(retry.clone()),
            categories: CategoryService::new(Arc::new(db.categories())).with_retry(retry),
            storage: Storage::Memory,
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &AppConfig) -> Option<Self> {
        use blog_infra::database::connect;
        use blog_infra::{PostgresCategoryRepository, PostgresPostRepository};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return None;
        };

        match connect(db_config).await {
            Ok(conn) => Some(Self {
                posts: PostService::new(Arc::new(PostgresPostRepository::new(conn.clone())))
                    .with_retry(config.retry.clone()),
                categories: CategoryService::new(Arc::new(PostgresCategoryRepository::new(conn)))
                    .with_retry(config.retry.clone()),
                storage: Storage::Postgres,
            }),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn postgres(_config: &AppConfig) -> Option<Self> {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        None
    }
}
