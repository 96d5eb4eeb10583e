//! Book endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::book::{BookDto, CreateBook, UpdateBook},
};

/// List all books
#[utoipa::path(
    get,
    path = "/GetBooks",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<BookDto>)
    )
)]
pub async fn get_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.library.get_books().await?;
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/CreateBook",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(req): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    let created = state.services.library.create_book(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a book's fields and associations
#[utoipa::path(
    put,
    path = "/UpdateBook",
    tag = "books",
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book, author, or genre not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Json(req): Json<UpdateBook>,
) -> AppResult<Json<BookDto>> {
    let updated = state.services.library.update_book(req).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookParams {
    pub book_id: String,
}

/// Delete a book, returning its pre-deletion state
#[utoipa::path(
    delete,
    path = "/DeleteBook",
    tag = "books",
    params(
        ("bookId" = String, Query, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Query(params): Query<DeleteBookParams>,
) -> AppResult<Json<BookDto>> {
    let deleted = state.services.library.delete_book(&params.book_id).await?;
    Ok(Json(deleted))
}
