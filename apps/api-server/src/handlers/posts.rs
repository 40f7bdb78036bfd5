//! Post handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use blog_core::domain::{PostId, UserId};
use blog_core::usecases::{CreatePostInput, UpdatePostInput};
use blog_shared::dto::{CreatePostRequest, PostEnvelope, PostListResponse, UpdatePostRequest};

use super::post_view;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Optional listing filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub published: Option<bool>,
    pub author_id: Option<String>,
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .create_post
        .execute(CreatePostInput {
            title: req.title,
            content: req.content,
            author_id: identity.user_id,
            published: req.published,
        })
        .await?;

    tracing::info!(post_id = %post.id(), "Post created");

    Ok(HttpResponse::Created().json(PostEnvelope {
        message: Some("Post created successfully".to_string()),
        post: post_view(&post),
    }))
}

/// GET /api/posts[?published=true][&authorId=...]
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let mut posts = match query.author_id {
        Some(author) => state.get_post.by_author(&UserId::new(author)?).await?,
        None if query.published == Some(true) => state.get_post.published().await?,
        None => state.get_post.all().await?,
    };
    if let Some(published) = query.published {
        posts.retain(|p| p.published() == published);
    }

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: posts.iter().map(post_view).collect(),
    }))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post_id = PostId::new(path.into_inner())?;
    let post = state.get_post.by_id(&post_id).await?;

    Ok(HttpResponse::Ok().json(PostEnvelope {
        message: None,
        post: post_view(&post),
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = PostId::new(path.into_inner())?;
    let req = body.into_inner();

    let post = state
        .update_post
        .execute(
            &post_id,
            UpdatePostInput {
                title: req.title,
                content: req.content,
                published: req.published,
            },
            &identity.user_id,
        )
        .await?;

    Ok(HttpResponse::Ok().json(PostEnvelope {
        message: Some("Post updated successfully".to_string()),
        post: post_view(&post),
    }))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post_id = PostId::new(path.into_inner())?;
    state.delete_post.execute(&post_id, &identity.user_id).await?;

    tracing::info!(post_id = %post_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
