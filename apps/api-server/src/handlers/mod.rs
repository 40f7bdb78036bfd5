//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod users;

use actix_web::web;
use chrono::{DateTime, SecondsFormat, Utc};

use blog_core::domain::{Comment, Post, User};
use blog_shared::dto::{CommentResponse, PostResponse, UserResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // User routes
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login))
                    .route("/logout", web::post().to(users::logout))
                    .route("/profile", web::get().to(users::profile)),
            )
            // Post and comment routes
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::list))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{post_id}/comments", web::post().to(comments::create))
                    .route("/{post_id}/comments", web::get().to(comments::list)),
            ),
    );
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn user_view(user: &User) -> UserResponse {
    UserResponse {
        id: user.id().to_string(),
        email: user.email().to_string(),
        username: user.username().to_string(),
        created_at: timestamp(user.created_at()),
    }
}

pub(crate) fn post_view(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id().to_string(),
        title: post.title().to_string(),
        content: post.content().to_string(),
        author_id: post.author_id().to_string(),
        published: post.published(),
        created_at: timestamp(post.created_at()),
        updated_at: timestamp(post.updated_at()),
    }
}

pub(crate) fn comment_view(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id().to_string(),
        post_id: comment.post_id().to_string(),
        author_id: comment.author_id().to_string(),
        content: comment.content().to_string(),
        created_at: timestamp(comment.created_at()),
    }
}
