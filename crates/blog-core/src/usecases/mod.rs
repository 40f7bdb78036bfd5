//! Use cases - one orchestrated business operation each.
//!
//! Use cases are stateless: they hold shared handles to repositories and
//! services, perform a short sequence of repository calls, and translate
//! absence and ownership failures into [`DomainError`](crate::DomainError)s.

mod comments;
mod posts;
mod users;

pub use comments::{CreateComment, CreateCommentInput, GetComment};
pub use posts::{CreatePost, CreatePostInput, DeletePost, GetPost, UpdatePost, UpdatePostInput};
pub use users::{
    GetUserProfile, LoginResult, LoginUser, LoginUserInput, LogoutUser, RegisterUser,
    RegisterUserInput,
};
