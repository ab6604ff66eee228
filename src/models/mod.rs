//! Data models for Bookshelf

pub mod author;
pub mod book;
pub mod enums;
pub mod genre;
pub mod user;

// Re-export commonly used types
pub use author::{Author, NewAuthor};
pub use book::{Book, BookDetail, NewBook};
pub use enums::{Audience, AudienceChoice};
pub use genre::{Genre, NewGenre};
pub use user::{NewUser, ProfileUpdate, User, UserClaims};
