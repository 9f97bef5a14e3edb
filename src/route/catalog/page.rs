use axum::{extract::State, response::Html};

use crate::{
    error::{ApiError, InternalServerError},
    extractor::query::ApiQuery,
    state::ApiState,
    traits::StateProvider,
};

use super::CatalogQuery;

/// The catalog page. Loading and failure are part of the page, not errors.
pub async fn catalog_page(
    ApiQuery(query): ApiQuery<CatalogQuery>,
    State(state): State<ApiState>,
) -> Result<Html<String>, ApiError> {
    let view = query.into_view(state.catalog().phase().await);

    let html = state
        .renderer()
        .render(&view)
        .map_err(|err| InternalServerError::from_generic_error(state.error_verbosity(), err))?;

    Ok(Html(html))
}
