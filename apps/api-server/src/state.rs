//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::PostFilter;
use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository, seed};

#[cfg(feature = "postgres")]
use blog_infra::{DatabasePool, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with the store the configuration selects.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let posts = Self::connect_store(db_config).await;
        tracing::info!("Application state initialized");
        Self::with_repository(posts)
    }

    /// Wrap an already constructed store.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    #[cfg(feature = "postgres")]
    async fn connect_store(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match DatabasePool::connect(config).await {
            Ok(pool) => Arc::new(PostgresPostRepository::new(pool.conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_store(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        if db_config.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }

    /// Load the bundled seed posts unless the store already holds posts.
    pub async fn seed_if_empty(&self) {
        match self.posts.find_one(PostFilter::default()).await {
            Ok(Some(_)) => tracing::info!("Store not empty, skipping seed"),
            Ok(None) => {
                if let Err(e) = seed::seed(self.posts.as_ref()).await {
                    tracing::error!("Failed to seed posts: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to inspect store before seeding: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{Author, NewPost};

    #[tokio::test]
    async fn test_seed_if_empty_fills_empty_store() {
        let store = Arc::new(InMemoryPostRepository::new());
        let state = AppState::with_repository(store.clone());

        state.seed_if_empty().await;

        assert_eq!(store.len().await, seed::seed_posts().unwrap().len());
    }

    #[tokio::test]
    async fn test_seed_if_empty_skips_populated_store() {
        let store = Arc::new(InMemoryPostRepository::new());
        store
            .create(NewPost {
                title: "already here".to_string(),
                author: Author::new("Alex", "Pogromko"),
                content: "existing".to_string(),
            })
            .await
            .unwrap();
        let state = AppState::with_repository(store.clone());

        state.seed_if_empty().await;

        assert_eq!(store.len().await, 1);
    }
}
