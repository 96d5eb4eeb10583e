//! Data models for Librarium

pub mod author;
pub mod book;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorDto};
pub use book::{Book, BookDto, BookRecord};
pub use genre::{Genre, GenreDto, GenreRef};
