use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewPost, PostChanges, PostFilter};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog post store.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// Bulk insert, used for seeding. Returns the number of posts inserted.
    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<usize, RepoError>;

    /// All posts, oldest first.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// First post matching `filter`.
    async fn find_one(&self, filter: PostFilter) -> Result<Option<BlogPost>, RepoError>;

    /// Apply the allow-listed `changes` to the post with `id`.
    async fn update_by_id(&self, id: Uuid, changes: PostChanges) -> Result<(), RepoError>;

    /// Remove and return the first post matching `filter`.
    async fn find_one_and_remove(
        &self,
        filter: PostFilter,
    ) -> Result<Option<BlogPost>, RepoError>;

    /// Create a post with a fresh id and timestamps.
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError> {
        self.insert(BlogPost::new(post)).await
    }
}
