//! Blog post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Author, BlogPost, NewPost, PostChanges};
use blog_core::error::DomainError;
use blog_shared::dto::{AuthorDto, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: BlogPost) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        author: post.author.display_name(),
        title: post.title,
        content: post.content,
        created: post.created_at.to_rfc3339(),
    }
}

fn to_author(author: AuthorDto) -> Author {
    Author::new(author.first_name, author.last_name)
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "BlogPost",
            id,
        })?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(NewPost {
            title: req.title,
            author: to_author(req.author),
            content: req.content,
        })
        .await?;

    tracing::info!(post_id = %post.id, "Created post");
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = req.id.filter(|body_id| *body_id != id) {
        return Err(DomainError::Validation(format!(
            "Request path id ({id}) and request body id ({body_id}) must match"
        ))
        .into());
    }

    let changes = PostChanges {
        title: req.title,
        author: req.author.map(to_author),
        content: req.content,
    };
    state.posts.update_by_id(id, changes).await?;

    tracing::info!(post_id = %id, "Updated post");
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Deleted post");
    Ok(HttpResponse::NoContent().finish())
}
