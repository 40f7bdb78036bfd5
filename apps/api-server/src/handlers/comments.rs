//! Comment handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::PostId;
use blog_core::usecases::CreateCommentInput;
use blog_shared::dto::{CommentEnvelope, CommentListResponse, CreateCommentRequest};

use super::comment_view;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = PostId::new(path.into_inner())?;

    let comment = state
        .create_comment
        .execute(CreateCommentInput {
            post_id,
            author_id: identity.user_id,
            content: body.into_inner().content,
        })
        .await?;

    Ok(HttpResponse::Created().json(CommentEnvelope {
        message: "Comment created successfully".to_string(),
        comment: comment_view(&comment),
    }))
}

/// GET /api/posts/{post_id}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post_id = PostId::new(path.into_inner())?;
    let comments = state.get_comment.by_post(&post_id).await?;

    Ok(HttpResponse::Ok().json(CommentListResponse {
        comments: comments.iter().map(comment_view).collect(),
    }))
}
