//! PostgreSQL persistence via SeaORM.

mod connections;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_base::{DomainEntity, PostgresBaseRepository};
pub use postgres_repo::{PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository};
