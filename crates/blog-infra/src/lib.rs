//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database, session store and credential integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `redis` - Redis-backed session store

pub mod memory;
pub mod session;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository};
pub use session::{InMemorySessionStore, SessionTokenService};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConfig, DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, PasswordHashConfig};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use session::{RedisSessionConfig, RedisSessionStore};
