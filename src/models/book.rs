//! Book model and related types.
//!
//! The stored row carries only scalar fields; association state (author ids,
//! genre) is resolved by the repository inside a transaction boundary and
//! returned as a [`BookRecord`]. Live entity graphs are never exposed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::genre::GenreRef;

/// Book row as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub pages: i32,
    pub genre_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Book with resolved association state, as loaded by the repository.
///
/// `author_ids` may contain ids that no longer resolve to an author row;
/// deletes do not cascade and dangling references are surfaced as-is.
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub book: Book,
    pub author_ids: Vec<String>,
    pub genre: Option<GenreRef>,
}

/// Book response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub pages: i32,
    pub created_at: DateTime<Utc>,
    pub authors_ids: Vec<String>,
    pub genre: Option<GenreRef>,
}

impl From<BookRecord> for BookDto {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.book.id,
            title: record.book.title,
            pages: record.book.pages,
            created_at: record.book.created_at,
            authors_ids: record.author_ids,
            genre: record.genre,
        }
    }
}

/// Create book request. Authors and genre are attached via a follow-up
/// update; a freshly created book has neither.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 1))]
    pub pages: i32,
}

/// Update book request. `authors_ids` is the complete replacement set for
/// the book's author association; omitting `genre_id` clears the genre.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1))]
    pub book_id_for_lookup_reference: String,
    #[validate(length(min = 1))]
    pub new_title: String,
    #[validate(range(min = 1))]
    pub new_page_count: i32,
    pub authors_ids: Vec<String>,
    pub genre_id: Option<String>,
}
