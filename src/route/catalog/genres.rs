use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    catalog::derived_genre_list,
    error::{ApiError, CatalogUnavailableError},
    state::ApiState,
    traits::StateProvider,
};

#[derive(Debug, Serialize)]
pub struct ListGenresResponse {
    pub genres: Vec<String>,
}

impl IntoResponse for ListGenresResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn list_genres(State(state): State<ApiState>) -> Result<ListGenresResponse, ApiError> {
    let phase = state.catalog().phase().await;

    if let Some(err) = CatalogUnavailableError::from_phase(state.error_verbosity(), &phase) {
        return Err(err.into());
    }

    Ok(ListGenresResponse {
        genres: derived_genre_list(phase.books()),
    })
}
