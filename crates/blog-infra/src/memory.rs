//! In-memory post store - used when no database is configured and by tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostChanges, PostFilter};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// Posts kept in insertion order behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        posts.remove(index);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_many(&self, new_posts: Vec<BlogPost>) -> Result<usize, RepoError> {
        let mut posts = self.posts.write().await;
        // All or nothing, like a single multi-row INSERT.
        for (i, post) in new_posts.iter().enumerate() {
            let clashes = posts.iter().chain(&new_posts[..i]).any(|p| p.id == post.id);
            if clashes {
                return Err(RepoError::Constraint(format!("post {} already exists", post.id)));
            }
        }

        let count = new_posts.len();
        posts.extend(new_posts);
        tracing::debug!(count, "Inserted posts");
        Ok(count)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_one(&self, filter: PostFilter) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| filter.matches(p)).cloned())
    }

    async fn update_by_id(&self, id: Uuid, changes: PostChanges) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        if post.apply(changes) {
            tracing::debug!(post_id = %id, "Updated post");
        }
        Ok(())
    }

    async fn find_one_and_remove(
        &self,
        filter: PostFilter,
    ) -> Result<Option<BlogPost>, RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts.iter().position(|p| filter.matches(p));
        let removed = index.map(|index| posts.remove(index));

        if let Some(post) = &removed {
            tracing::debug!(post_id = %post.id, "Removed post");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{Author, NewPost};

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            author: Author::new("Alex", "Pogromko"),
            content: "qwertyqwetryqwertyqwerrty".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("new post")).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_find_one_empty_filter_matches_first() {
        let repo = InMemoryPostRepository::new();
        assert!(repo.find_one(PostFilter::default()).await.unwrap().is_none());

        let first = repo.create(new_post("first")).await.unwrap();
        repo.create(new_post("second")).await.unwrap();

        let found = repo.find_one(PostFilter::default()).await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_update_applies_allowed_fields() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("new post")).await.unwrap();

        let changes = PostChanges {
            title: Some("changed post".to_string()),
            content: Some("blablabla".to_string()),
            author: Some(Author::new("Test auth", "test last name")),
        };
        repo.update_by_id(created.id, changes).await.unwrap();

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "changed post");
        assert_eq!(stored.content, "blablabla");
        assert_eq!(stored.author.display_name(), "Test auth test last name");
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryPostRepository::new();
        let err = repo
            .update_by_id(Uuid::new_v4(), PostChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_absent() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("doomed")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await.unwrap_err(),
            RepoError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_find_one_and_remove() {
        let repo = InMemoryPostRepository::new();
        repo.create(new_post("keep")).await.unwrap();
        let doomed = repo.create(new_post("doomed")).await.unwrap();

        let removed = repo
            .find_one_and_remove(PostFilter::by_title("doomed"))
            .await
            .unwrap();
        assert_eq!(removed.map(|p| p.id), Some(doomed.id));
        assert_eq!(repo.len().await, 1);

        let again = repo
            .find_one_and_remove(PostFilter::by_id(doomed.id))
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_insert_many_rejects_duplicate_ids() {
        let repo = InMemoryPostRepository::new();
        let post = BlogPost::new(new_post("twin"));

        let err = repo
            .insert_many(vec![post.clone(), post])
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
        assert!(repo.is_empty().await);
    }
}
