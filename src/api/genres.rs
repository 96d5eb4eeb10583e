//! Genre endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::genre::GenreDto};

/// List all genres
#[utoipa::path(
    get,
    path = "/GetGenres",
    tag = "genres",
    responses(
        (status = 200, description = "List of genres", body = Vec<GenreDto>)
    )
)]
pub async fn get_genres(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<GenreDto>>> {
    let genres = state.services.library.get_genres().await?;
    Ok(Json(genres))
}
