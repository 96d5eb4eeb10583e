//! Books repository for database operations.
//!
//! Every mutation runs in a single transaction. Referenced author and genre
//! ids are resolved inside that transaction before any row is touched, so a
//! failed resolution rolls back with nothing committed.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookRecord},
        genre::GenreRef,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books with their association state
    pub async fn list(&self) -> AppResult<Vec<BookRecord>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, pages, genre_id, created_at FROM books ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        // Junction rows for all books in one query, grouped in order
        let rows = sqlx::query(
            "SELECT book_id, author_id FROM book_authors ORDER BY book_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut authors_by_book: HashMap<String, Vec<String>> = HashMap::new();
        for row in &rows {
            authors_by_book
                .entry(row.get("book_id"))
                .or_default()
                .push(row.get("author_id"));
        }

        let genre_rows = sqlx::query_as::<_, GenreRef>("SELECT id, name FROM genres")
            .fetch_all(&self.pool)
            .await?;
        let genres_by_id: HashMap<String, GenreRef> = genre_rows
            .into_iter()
            .map(|g| (g.id.clone(), g))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let author_ids = authors_by_book.remove(&book.id).unwrap_or_default();
                // A dangling genre_id projects as no genre
                let genre = book
                    .genre_id
                    .as_ref()
                    .and_then(|gid| genres_by_id.get(gid).cloned());
                BookRecord {
                    book,
                    author_ids,
                    genre,
                }
            })
            .collect())
    }

    /// Get a book by id with its association state
    pub async fn get(&self, id: &str) -> AppResult<BookRecord> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, pages, genre_id, created_at FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let author_ids = self.get_book_author_ids(id).await?;
        let genre = self.resolve_genre(book.genre_id.as_deref()).await?;

        Ok(BookRecord {
            book,
            author_ids,
            genre,
        })
    }

    /// Author ids for a book via the book_authors junction table.
    /// Ids of since-deleted authors are returned as-is.
    async fn get_book_author_ids(&self, book_id: &str) -> AppResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT author_id FROM book_authors WHERE book_id = $1 ORDER BY position",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|r| r.get("author_id")).collect())
    }

    async fn resolve_genre(&self, genre_id: Option<&str>) -> AppResult<Option<GenreRef>> {
        let Some(genre_id) = genre_id else {
            return Ok(None);
        };

        let genre = sqlx::query_as::<_, GenreRef>("SELECT id, name FROM genres WHERE id = $1")
            .bind(genre_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(genre)
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create a new book with no authors and no genre
    pub async fn create(&self, title: &str, pages: i32) -> AppResult<BookRecord> {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, pages, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, pages, genre_id, created_at
            "#,
        )
        .bind(&id)
        .bind(title)
        .bind(pages)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(BookRecord {
            book,
            author_ids: Vec::new(),
            genre: None,
        })
    }

    // =========================================================================
    // UPDATE (relationship rewrite)
    // =========================================================================

    /// Update a book's fields and rewrite its association set atomically.
    ///
    /// The prior author set is fully replaced by `author_ids` (not merged),
    /// and the genre reference is overwritten, cleared when `genre_id` is
    /// `None`. All referenced ids must resolve or the transaction rolls back.
    pub async fn update(
        &self,
        id: &str,
        title: &str,
        pages: i32,
        author_ids: &[String],
        genre_id: Option<&str>,
    ) -> AppResult<BookRecord> {
        let mut tx = self.pool.begin().await?;

        // Lock the target row so concurrent rewrites of the same book serialize
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, pages, genre_id, created_at FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        for author_id in author_ids {
            let exists: Option<String> =
                sqlx::query_scalar("SELECT id FROM authors WHERE id = $1")
                    .bind(author_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if exists.is_none() {
                return Err(AppError::NotFound(format!(
                    "Author {} not found",
                    author_id
                )));
            }
        }

        let genre = match genre_id {
            Some(genre_id) => Some(
                sqlx::query_as::<_, GenreRef>("SELECT id, name FROM genres WHERE id = $1")
                    .bind(genre_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", genre_id)))?,
            ),
            None => None,
        };

        sqlx::query("UPDATE books SET title = $1, pages = $2, genre_id = $3 WHERE id = $4")
            .bind(title)
            .bind(pages)
            .bind(genre_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Full replacement: delete existing junction rows then insert the new set
        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (idx, author_id) in author_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_authors (book_id, author_id, position) VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(author_id)
            .bind((idx + 1) as i16)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(BookRecord {
            book: Book {
                title: title.to_string(),
                pages,
                genre_id: genre_id.map(str::to_string),
                ..book
            },
            author_ids: author_ids.to_vec(),
            genre,
        })
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book, returning its pre-deletion state
    pub async fn delete(&self, id: &str) -> AppResult<BookRecord> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, pages, genre_id, created_at FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let rows = sqlx::query(
            "SELECT author_id FROM book_authors WHERE book_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;
        let author_ids: Vec<String> = rows.iter().map(|r| r.get("author_id")).collect();

        let genre = match book.genre_id.as_deref() {
            Some(genre_id) => {
                sqlx::query_as::<_, GenreRef>("SELECT id, name FROM genres WHERE id = $1")
                    .bind(genre_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(BookRecord {
            book,
            author_ids,
            genre,
        })
    }
}
