//! Library administration service.
//!
//! Validates request DTOs, drives the repository, and projects stored
//! entities to their response shapes. Relationship maintenance (the
//! Book↔Author set and the Book→Genre reference) happens in the books
//! repository inside one transaction per mutation.

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{AuthorDto, CreateAuthor, UpdateAuthor},
        book::{BookDto, CreateBook, UpdateBook},
        genre::GenreDto,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all authors
    pub async fn get_authors(&self) -> AppResult<Vec<AuthorDto>> {
        let authors = self.repository.authors.list().await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    /// List all books with their association state
    pub async fn get_books(&self) -> AppResult<Vec<BookDto>> {
        let records = self.repository.books.list().await?;
        Ok(records.into_iter().map(BookDto::from).collect())
    }

    /// List all genres
    pub async fn get_genres(&self) -> AppResult<Vec<GenreDto>> {
        let genres = self.repository.genres.list().await?;
        Ok(genres.into_iter().map(GenreDto::from).collect())
    }

    /// Create a book. The new book starts with no authors and no genre;
    /// relations are attached via a follow-up update.
    pub async fn create_book(&self, req: CreateBook) -> AppResult<BookDto> {
        req.validate()?;

        let record = self.repository.books.create(&req.title, req.pages).await?;
        tracing::info!("Created book {}", record.book.id);
        Ok(BookDto::from(record))
    }

    /// Update a book's fields and rewrite its associations.
    ///
    /// The author set is fully replaced by `authors_ids`; a single optional
    /// genre id overwrites (or clears) the genre reference. Callers that let
    /// users pick several genres must choose one before calling.
    pub async fn update_book(&self, req: UpdateBook) -> AppResult<BookDto> {
        req.validate()?;

        let record = self
            .repository
            .books
            .update(
                &req.book_id_for_lookup_reference,
                &req.new_title,
                req.new_page_count,
                &req.authors_ids,
                req.genre_id.as_deref(),
            )
            .await?;
        Ok(BookDto::from(record))
    }

    /// Delete a book, returning its pre-deletion projection
    pub async fn delete_book(&self, book_id: &str) -> AppResult<BookDto> {
        let record = self.repository.books.delete(book_id).await?;
        tracing::info!("Deleted book {}", book_id);
        Ok(BookDto::from(record))
    }

    /// Create an author
    pub async fn create_author(&self, req: CreateAuthor) -> AppResult<AuthorDto> {
        req.validate()?;

        let author = self.repository.authors.create(&req.name).await?;
        tracing::info!("Created author {}", author.id);
        Ok(AuthorDto::from(author))
    }

    /// Rename an author
    pub async fn update_author(&self, req: UpdateAuthor) -> AppResult<AuthorDto> {
        req.validate()?;

        let author = self
            .repository
            .authors
            .rename(&req.author_id_for_lookup_reference, &req.new_name)
            .await?;
        Ok(AuthorDto::from(author))
    }

    /// Delete an author, returning the pre-deletion projection.
    /// Books referencing the author are not cleaned up; their author id
    /// lists keep the dangling id.
    pub async fn delete_author(&self, author_id: &str) -> AppResult<AuthorDto> {
        let author = self.repository.authors.delete(author_id).await?;
        tracing::info!("Deleted author {}", author_id);
        Ok(AuthorDto::from(author))
    }
}
