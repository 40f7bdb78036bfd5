//! End-to-end use case flows over the in-memory adapters.

#![cfg(feature = "auth")]

use std::sync::Arc;

use blog_core::domain::{PostId, UserId};
use blog_core::ports::{BaseRepository, CommentRepository, UserRepository};
use blog_core::services::AuthService;
use blog_core::usecases::*;
use blog_core::{DomainError, ErrorKind};
use blog_infra::{
    Argon2PasswordService, InMemoryCommentRepository, InMemoryPostRepository,
    InMemorySessionStore, InMemoryUserRepository, PasswordHashConfig, SessionTokenService,
};

struct Harness {
    users: Arc<InMemoryUserRepository>,
    posts: Arc<InMemoryPostRepository>,
    comments: Arc<InMemoryCommentRepository>,
    auth: AuthService,
}

impl Harness {
    fn new() -> Self {
        let passwords = Argon2PasswordService::with_config(PasswordHashConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let tokens = SessionTokenService::new(Arc::new(InMemorySessionStore::new()), 3600).unwrap();

        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            auth: AuthService::new(Arc::new(passwords), Arc::new(tokens)),
        }
    }

    async fn register(&self, email: &str, username: &str) -> UserId {
        RegisterUser::new(self.users.clone(), self.auth.clone())
            .execute(RegisterUserInput {
                email: email.to_string(),
                username: username.to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap()
            .id()
            .clone()
    }

    async fn post(&self, author: &UserId) -> PostId {
        CreatePost::new(self.posts.clone())
            .execute(CreatePostInput {
                title: "Hello World".to_string(),
                content: "This is my first post.".to_string(),
                author_id: author.clone(),
                published: None,
            })
            .await
            .unwrap()
            .id()
            .clone()
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let h = Harness::new();
    let user_id = h.register("Alice@Example.com", "alice").await;

    let result = LoginUser::new(h.users.clone(), h.auth.clone())
        .execute(LoginUserInput {
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.user.id(), &user_id);
    assert_eq!(result.user.email().as_str(), "alice@example.com");
    assert_eq!(result.token.expires_in, 3600);

    let ctx = h.auth.verify_token(&result.token.token).await.unwrap();
    assert_eq!(ctx.user_id, user_id);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let h = Harness::new();
    h.register("a@x.com", "alice").await;

    let err = RegisterUser::new(h.users.clone(), h.auth.clone())
        .execute(RegisterUserInput {
            email: "A@X.COM".to_string(),
            username: "alice2".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Duplicate);
    assert_eq!(err.to_string(), "User with this email already exists");
    assert_eq!(h.users.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_failed() {
    let h = Harness::new();
    h.register("a@x.com", "alice").await;
    let login = LoginUser::new(h.users.clone(), h.auth.clone());

    let wrong_password = login
        .execute(LoginUserInput {
            email: "a@x.com".to_string(),
            password: "nope".to_string(),
        })
        .await
        .unwrap_err();
    let unknown_email = login
        .execute(LoginUserInput {
            email: "b@x.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password.kind(), ErrorKind::Authentication);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let h = Harness::new();
    h.register("a@x.com", "alice").await;
    let result = LoginUser::new(h.users.clone(), h.auth.clone())
        .execute(LoginUserInput {
            email: "a@x.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();

    LogoutUser::new(h.auth.clone())
        .execute(&result.token.token)
        .await
        .unwrap();

    let err = h.auth.verify_token(&result.token.token).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
}

#[tokio::test]
async fn test_profile_of_missing_user_is_not_found() {
    let h = Harness::new();
    let err = GetUserProfile::new(h.users.clone())
        .execute(&UserId::new("ghost").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));
}

#[tokio::test]
async fn test_non_owner_cannot_update_or_delete() {
    let h = Harness::new();
    let alice = h.register("a@x.com", "alice").await;
    let bob = h.register("b@x.com", "bobby").await;
    let post_id = h.post(&alice).await;
    let before = h.posts.find_by_id(&post_id).await.unwrap().unwrap();

    let update_err = UpdatePost::new(h.posts.clone())
        .execute(
            &post_id,
            UpdatePostInput {
                title: Some("Hijacked title".to_string()),
                ..Default::default()
            },
            &bob,
        )
        .await
        .unwrap_err();
    assert_eq!(update_err.kind(), ErrorKind::Unauthorized);
    assert_eq!(
        update_err.to_string(),
        "You are not authorized to update this post"
    );

    let invalid_err = UpdatePost::new(h.posts.clone())
        .execute(
            &post_id,
            UpdatePostInput {
                title: Some("x".to_string()),
                ..Default::default()
            },
            &bob,
        )
        .await
        .unwrap_err();
    assert_eq!(invalid_err.kind(), ErrorKind::Unauthorized);

    let delete_err = DeletePost::new(h.posts.clone(), h.comments.clone())
        .execute(&post_id, &bob)
        .await
        .unwrap_err();
    assert_eq!(delete_err.kind(), ErrorKind::Unauthorized);

    assert_eq!(h.posts.find_by_id(&post_id).await.unwrap(), Some(before));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let h = Harness::new();
    let alice = h.register("a@x.com", "alice").await;
    let post_id = h.post(&alice).await;

    let updated = UpdatePost::new(h.posts.clone())
        .execute(
            &post_id,
            UpdatePostInput {
                published: Some(true),
                ..Default::default()
            },
            &alice,
        )
        .await
        .unwrap();

    assert!(updated.published());
    assert_eq!(updated.title(), "Hello World");
    assert!(updated.updated_at() >= updated.created_at());
    assert_eq!(GetPost::new(h.posts.clone()).published().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_update_leaves_post_unchanged() {
    let h = Harness::new();
    let alice = h.register("a@x.com", "alice").await;
    let post_id = h.post(&alice).await;

    let err = UpdatePost::new(h.posts.clone())
        .execute(
            &post_id,
            UpdatePostInput {
                title: Some("A much better title".to_string()),
                content: Some("short".to_string()),
                published: None,
            },
            &alice,
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    let stored = h.posts.find_by_id(&post_id).await.unwrap().unwrap();
    assert_eq!(stored.title(), "Hello World");
}

#[tokio::test]
async fn test_comment_on_missing_post_is_not_found() {
    let h = Harness::new();
    let alice = h.register("a@x.com", "alice").await;
    let missing = PostId::new("missing").unwrap();

    let err = CreateComment::new(h.comments.clone(), h.posts.clone())
        .execute(CreateCommentInput {
            post_id: missing.clone(),
            author_id: alice.clone(),
            content: "Hello?".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(h.comments.find_by_author(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_post_cascades_to_comments() {
    let h = Harness::new();
    let alice = h.register("a@x.com", "alice").await;
    let bob = h.register("b@x.com", "bobby").await;
    let post_id = h.post(&alice).await;

    let create_comment = CreateComment::new(h.comments.clone(), h.posts.clone());
    for (author, content) in [(&bob, "First!"), (&alice, "Thanks")] {
        create_comment
            .execute(CreateCommentInput {
                post_id: post_id.clone(),
                author_id: author.clone(),
                content: content.to_string(),
            })
            .await
            .unwrap();
    }

    let thread = GetComment::new(h.comments.clone()).by_post(&post_id).await.unwrap();
    assert_eq!(thread.len(), 2);

    DeletePost::new(h.posts.clone(), h.comments.clone())
        .execute(&post_id, &alice)
        .await
        .unwrap();

    assert!(h.posts.find_by_id(&post_id).await.unwrap().is_none());
    assert!(h.comments.find_by_post(&post_id).await.unwrap().is_empty());
    assert!(matches!(
        GetPost::new(h.posts.clone()).by_id(&post_id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_concurrent_registrations_admit_one_account() {
    let h = Harness::new();
    let register = RegisterUser::new(h.users.clone(), h.auth.clone());
    let input = |username: &str| RegisterUserInput {
        email: "same@x.com".to_string(),
        username: username.to_string(),
        password: "secret123".to_string(),
    };

    let (first, second) = tokio::join!(
        register.execute(input("first")),
        register.execute(input("second"))
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(DomainError::Duplicate { field: "email", .. })
    )));
    assert_eq!(h.users.find_all().await.unwrap().len(), 1);
}
