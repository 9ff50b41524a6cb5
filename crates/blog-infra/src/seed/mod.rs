//! Bundled seed dataset.

use blog_core::domain::{BlogPost, NewPost};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

const SEED_DATA: &str = include_str!("seed-data.json");

/// Parse the bundled seed posts.
pub fn seed_posts() -> Result<Vec<NewPost>, serde_json::Error> {
    serde_json::from_str(SEED_DATA)
}

/// Insert the bundled seed posts, each with a fresh id.
pub async fn seed(repo: &dyn PostRepository) -> Result<usize, RepoError> {
    let posts = seed_posts()
        .map_err(|e| RepoError::Query(format!("invalid seed data: {e}")))?
        .into_iter()
        .map(BlogPost::new)
        .collect();

    let count = repo.insert_many(posts).await?;
    tracing::info!(count, "Seeded posts");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPostRepository;

    #[test]
    fn test_seed_data_parses() {
        let posts = seed_posts().unwrap();
        assert_eq!(posts.len(), 11);
        assert!(posts.iter().all(|p| !p.title.is_empty() && !p.content.is_empty()));
    }

    #[tokio::test]
    async fn test_seed_inserts_all_posts() {
        let repo = InMemoryPostRepository::new();
        assert_eq!(seed(&repo).await.unwrap(), 11);
        assert_eq!(repo.find_all().await.unwrap().len(), 11);
    }
}
