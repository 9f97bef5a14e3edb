use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    catalog::Book,
    error::{ApiError, CatalogUnavailableError},
    extractor::query::ApiQuery,
    state::ApiState,
    traits::StateProvider,
};

use super::CatalogQuery;

#[derive(Debug, Serialize)]
pub struct ListBooksResponse {
    pub count: usize,
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn list_books(
    ApiQuery(query): ApiQuery<CatalogQuery>,
    State(state): State<ApiState>,
) -> Result<ListBooksResponse, ApiError> {
    let phase = state.catalog().phase().await;

    if let Some(err) = CatalogUnavailableError::from_phase(state.error_verbosity(), &phase) {
        return Err(err.into());
    }

    let view = query.into_view(phase);
    let books: Vec<Book> = view.filtered().into_iter().cloned().collect();

    Ok(ListBooksResponse {
        count: books.len(),
        books,
    })
}
