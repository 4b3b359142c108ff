//! Data models for Delete-A-Tweet

mod post;
mod user;

pub use post::Post;
pub use user::User;
