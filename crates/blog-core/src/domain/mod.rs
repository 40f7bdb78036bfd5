//! Domain entities and value objects - the core business objects.

mod comment;
mod email;
mod ids;
mod post;
mod user;

use chrono::{DateTime, SubsecRound, Utc};

pub use comment::Comment;
pub use email::Email;
pub use ids::{CommentId, PostId, UserId};
pub use post::Post;
pub use user::User;

/// Current time at millisecond precision, so timestamps survive storage and
/// ISO-8601 rendering without drift.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Length of `value` in characters, ignoring surrounding whitespace.
pub(crate) fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}
