//! Application services shared by several use cases.

mod auth;

pub use auth::{AuthContext, AuthService, IssuedToken};

#[cfg(test)]
pub(crate) mod fakes;
