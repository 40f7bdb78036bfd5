//! # Blog Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, value objects, ports, the authentication service and use cases.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod usecases;

pub use error::{DomainError, ErrorKind, RepoError};
