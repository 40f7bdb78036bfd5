//! Server-side sessions - opaque session ids resolved through a session store.

mod memory;
mod token;

#[cfg(feature = "redis")]
mod redis;

pub use memory::InMemorySessionStore;
pub use token::SessionTokenService;

#[cfg(feature = "redis")]
pub use self::redis::{RedisSessionConfig, RedisSessionStore};
