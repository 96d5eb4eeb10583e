//! Author endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::author::{AuthorDto, CreateAuthor, UpdateAuthor},
};

/// List all authors
#[utoipa::path(
    get,
    path = "/GetAuthors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<AuthorDto>)
    )
)]
pub async fn get_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<AuthorDto>>> {
    let authors = state.services.library.get_authors().await?;
    Ok(Json(authors))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/CreateAuthor",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(req): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<AuthorDto>)> {
    let created = state.services.library.create_author(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename an author
#[utoipa::path(
    put,
    path = "/UpdateAuthor",
    tag = "authors",
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = AuthorDto),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Json(req): Json<UpdateAuthor>,
) -> AppResult<Json<AuthorDto>> {
    let updated = state.services.library.update_author(req).await?;
    Ok(Json(updated))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAuthorParams {
    pub author_id: String,
}

/// Delete an author, returning the pre-deletion state
#[utoipa::path(
    delete,
    path = "/DeleteAuthor",
    tag = "authors",
    params(
        ("authorId" = String, Query, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author deleted", body = AuthorDto),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Query(params): Query<DeleteAuthorParams>,
) -> AppResult<Json<AuthorDto>> {
    let deleted = state
        .services
        .library
        .delete_author(&params.author_id)
        .await?;
    Ok(Json(deleted))
}
