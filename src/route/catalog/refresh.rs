use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::{
        ApiError, CatalogUnavailableError, CatalogUnavailableErrorType, InternalServerError,
        RefreshInProgressError,
    },
    state::{ApiState, RefreshError},
    traits::StateProvider,
};

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub count: usize,
}

impl IntoResponse for RefreshResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Runs a new fetch cycle, replacing the published catalog.
pub async fn refresh_catalog(State(state): State<ApiState>) -> Result<RefreshResponse, ApiError> {
    let verbosity = state.error_verbosity();

    match state.catalog().refresh().await {
        Ok(catalog) => Ok(RefreshResponse {
            count: catalog.len(),
        }),
        Err(RefreshError::InProgress) => Err(RefreshInProgressError::new(verbosity).into()),
        Err(RefreshError::Catalog(_)) => Err(CatalogUnavailableError::new(
            verbosity,
            CatalogUnavailableErrorType::Failed,
        )
        .into()),
        Err(err @ RefreshError::Task(_)) => {
            Err(InternalServerError::from_generic_error(verbosity, err).into())
        }
    }
}
