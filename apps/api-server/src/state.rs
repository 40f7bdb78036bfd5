//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, SessionStore, TokenService, UserRepository,
};
use blog_core::services::AuthService;
use blog_core::usecases::{
    CreateComment, CreatePost, DeletePost, GetComment, GetPost, GetUserProfile, LoginUser,
    LogoutUser, RegisterUser, UpdatePost,
};
use blog_infra::{
    Argon2PasswordService, InMemoryCommentRepository, InMemoryPostRepository,
    InMemorySessionStore, InMemoryUserRepository, JwtTokenService, SessionTokenService,
};

#[cfg(feature = "postgres")]
use blog_infra::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

use crate::config::{AppConfig, AuthStrategy};

/// Repository handles behind their ports.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: &DatabaseConnections) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.main.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub register_user: RegisterUser,
    pub login_user: LoginUser,
    pub logout_user: LogoutUser,
    pub get_user_profile: GetUserProfile,
    pub create_post: CreatePost,
    pub get_post: GetPost,
    pub update_post: UpdatePost,
    pub delete_post: DeletePost,
    pub create_comment: CreateComment,
    pub get_comment: GetComment,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        let (db, repos) = match &config.database {
            Some(db_config) => {
                let connections = DatabaseConnections::init(db_config)
                    .await
                    .context("failed to connect to database")?;

                if config.auto_migrate {
                    use migration::MigratorTrait;
                    migration::Migrator::up(&connections.main, None)
                        .await
                        .context("failed to apply migrations")?;
                    tracing::info!("Database migrations applied");
                }

                let repos = Repositories::postgres(&connections);
                (Some(Arc::new(connections)), repos)
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        let auth = build_auth(config).await?;

        tracing::info!("Application state initialized");

        #[allow(unused_mut)]
        let mut state = Self::from_parts(repos, auth, config.production);
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }
        Ok(state)
    }

    /// Wire every use case over the given repositories.
    pub fn from_parts(repos: Repositories, auth: AuthService, secure_cookies: bool) -> Self {
        Self {
            register_user: RegisterUser::new(repos.users.clone(), auth.clone()),
            login_user: LoginUser::new(repos.users.clone(), auth.clone()),
            logout_user: LogoutUser::new(auth.clone()),
            get_user_profile: GetUserProfile::new(repos.users.clone()),
            create_post: CreatePost::new(repos.posts.clone()),
            get_post: GetPost::new(repos.posts.clone()),
            update_post: UpdatePost::new(repos.posts.clone()),
            delete_post: DeletePost::new(repos.posts.clone(), repos.comments.clone()),
            create_comment: CreateComment::new(repos.comments.clone(), repos.posts.clone()),
            get_comment: GetComment::new(repos.comments),
            auth,
            secure_cookies,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

async fn build_auth(config: &AppConfig) -> anyhow::Result<AuthService> {
    let passwords: Arc<dyn PasswordService> = Arc::new(
        Argon2PasswordService::with_config(config.password_hash)
            .context("invalid password hashing parameters")?,
    );

    let tokens: Arc<dyn TokenService> = match &config.auth {
        AuthStrategy::Jwt(jwt) => {
            tracing::info!(issuer = %jwt.issuer, "Using JWT authentication");
            Arc::new(JwtTokenService::new(jwt.clone()).context("invalid JWT settings")?)
        }
        AuthStrategy::Session { ttl_secs } => {
            let store = session_store(config).await?;
            let service = SessionTokenService::new(store, *ttl_secs)
                .context("invalid session settings")?;
            Arc::new(service)
        }
    };

    Ok(AuthService::new(passwords, tokens))
}

#[cfg(feature = "redis")]
async fn session_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    use blog_infra::{RedisSessionConfig, RedisSessionStore};

    match &config.redis {
        Some(redis) => {
            let store = RedisSessionStore::new(RedisSessionConfig {
                url: redis.url.clone(),
                connect_timeout: redis.connect_timeout,
            })
            .await
            .context("failed to connect to Redis session store")?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("REDIS_URL not set. Sessions are kept in memory.");
            Ok(Arc::new(InMemorySessionStore::new()))
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn session_store(config: &AppConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    if config.redis.is_some() {
        tracing::warn!("REDIS_URL is set but the redis feature is disabled. Sessions are kept in memory.");
    }
    Ok(Arc::new(InMemorySessionStore::new()))
}
