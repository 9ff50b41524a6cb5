//! PostgreSQL post store.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select, TransactionTrait};
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostChanges, PostFilter};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn select(filter: PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find().order_by_asc(post::Column::CreatedAt);
    if let Some(id) = filter.id {
        query = query.filter(post::Column::Id.eq(id));
    }
    if let Some(title) = filter.title {
        query = query.filter(post::Column::Title.eq(title));
    }
    query
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<usize, RepoError> {
        if posts.is_empty() {
            return Ok(0);
        }

        let count = posts.len();
        let models: Vec<post::ActiveModel> = posts.into_iter().map(Into::into).collect();
        PostEntity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(count, "Inserted posts");
        Ok(count)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = select(PostFilter::default())
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self, filter: PostFilter) -> Result<Option<BlogPost>, RepoError> {
        let result = select(filter).one(&self.db).await.map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn update_by_id(&self, id: Uuid, changes: PostChanges) -> Result<(), RepoError> {
        // UPDATE with no SET columns is invalid SQL, so only confirm existence.
        if changes.is_empty() {
            let exists = PostEntity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(query_error)?
                .is_some();
            return if exists { Ok(()) } else { Err(RepoError::NotFound) };
        }

        let now: DateTimeWithTimeZone = Utc::now().into();
        let mut update = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id));

        if let Some(title) = changes.title {
            update = update.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(author) = changes.author {
            update = update
                .col_expr(post::Column::AuthorFirstName, Expr::value(author.first_name))
                .col_expr(post::Column::AuthorLastName, Expr::value(author.last_name));
        }
        if let Some(content) = changes.content {
            update = update.col_expr(post::Column::Content, Expr::value(content));
        }

        let result = update.exec(&self.db).await.map_err(query_error)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Updated post");
        Ok(())
    }

    async fn find_one_and_remove(
        &self,
        filter: PostFilter,
    ) -> Result<Option<BlogPost>, RepoError> {
        let txn = self.db.begin().await.map_err(query_error)?;

        let Some(found) = select(filter).one(&txn).await.map_err(query_error)? else {
            return Ok(None);
        };

        PostEntity::delete_by_id(found.id)
            .exec(&txn)
            .await
            .map_err(query_error)?;
        txn.commit().await.map_err(query_error)?;

        tracing::debug!(post_id = %found.id, "Removed post");
        Ok(Some(found.into()))
    }
}
