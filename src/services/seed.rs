//! Development data seeding.
//!
//! Wipes the store and repopulates it with the default fixtures: one author,
//! one book, and the stock genre list. Only ever invoked when seeding is
//! enabled in configuration.

use chrono::Utc;

use crate::{error::AppResult, repository::Repository};

const DEFAULT_GENRES: &[&str] = &[
    "Thriller",
    "Fantasy",
    "Science Fiction",
    "Mystery",
    "Romance",
    "Non-Fiction",
    "Historical",
    "Horror",
    "Young Adult",
    "Classics",
];

#[derive(Clone)]
pub struct SeedService {
    repository: Repository,
}

impl SeedService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Remove all existing rows, then seed the default fixtures
    pub async fn seed(&self) -> AppResult<()> {
        sqlx::query("TRUNCATE book_authors, books, authors, genres")
            .execute(&self.repository.pool)
            .await?;

        let now = Utc::now();

        // Fixture ids are stable so the seeded rows are addressable in tests
        sqlx::query("INSERT INTO authors (id, name, created_at) VALUES ($1, $2, $3)")
            .bind("1")
            .bind("Bob")
            .bind(now)
            .execute(&self.repository.pool)
            .await?;

        sqlx::query("INSERT INTO books (id, title, pages, created_at) VALUES ($1, $2, $3, $4)")
            .bind("1")
            .bind("Bobs book")
            .bind(42)
            .bind(now)
            .execute(&self.repository.pool)
            .await?;

        for name in DEFAULT_GENRES {
            self.repository.genres.create(name).await?;
        }

        tracing::info!(
            "Seeded store: 1 author, 1 book, {} genres",
            DEFAULT_GENRES.len()
        );
        Ok(())
    }
}
