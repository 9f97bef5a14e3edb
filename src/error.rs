use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{catalog::FETCH_FAILED_MESSAGE, state::Phase, view::LOADING_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns an empty response with [`StatusCode::NO_CONTENT`] for all errors.
    None,
    /// Server returns only the appropriate status code.
    StatusCode,
    /// Server returns only the message with the appropriate status code.
    Message,
    /// Server returns the message, the error type with cleared error content and the appropriate status code.
    Type,
    /// Server returns the message, the error type with the error content and the appropriate status code.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    #[serde(flatten)]
    error: ApiError,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiErrorMessage {
    message: &'static str,
}

impl From<ApiErrorResponse> for ApiErrorMessage {
    fn from(response: ApiErrorResponse) -> Self {
        ApiErrorMessage {
            message: response.message,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();

        match self.error.verbosity() {
            ErrorVerbosity::None => StatusCode::NO_CONTENT.into_response(),
            ErrorVerbosity::StatusCode => status_code.into_response(),
            ErrorVerbosity::Message => {
                (status_code, Json(ApiErrorMessage::from(self))).into_response()
            }
            ErrorVerbosity::Type | ErrorVerbosity::Full => {
                (status_code, Json(self)).into_response()
            }
        }
    }
}

#[derive(Debug, From, Serialize)]
#[serde(tag = "error_type", content = "error")]
/// API error
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when an internal server error occurs.
    InternalServerError(InternalServerError),
    /// Query error
    ///
    /// This error is returned when the query parameters are not as expected.
    Query(QueryError),
    /// Method not allowed
    ///
    /// This error is returned when the method is not allowed.
    MethodNotAllowed(MethodNotAllowedError),
    /// Not found error
    ///
    /// This error is returned when the requested resource is not found.
    NotFound(NotFoundError),
    /// Catalog unavailable
    ///
    /// This error is returned while the catalog is loading or after its last fetch cycle failed.
    CatalogUnavailable(CatalogUnavailableError),
    /// Refresh in progress
    ///
    /// This error is returned when a refresh is requested while a fetch cycle is running.
    RefreshInProgress(RefreshInProgressError),
}

impl ApiError {
    fn verbosity(&self) -> ErrorVerbosity {
        match self {
            ApiError::InternalServerError(err) => err.verbosity,
            ApiError::Query(err) => err.verbosity,
            ApiError::MethodNotAllowed(err) => err.verbosity,
            ApiError::NotFound(err) => err.verbosity,
            ApiError::CatalogUnavailable(err) => err.verbosity,
            ApiError::RefreshInProgress(err) => err.verbosity,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::InternalServerError(_) => "An internal server error has occurred",
            ApiError::Query(_) => "Failed to parse query parameters",
            ApiError::MethodNotAllowed(_) => "Method not allowed",
            ApiError::NotFound(_) => "The requested resource was not found",
            ApiError::CatalogUnavailable(err) => err.message(),
            ApiError::RefreshInProgress(_) => "The catalog is already being refreshed",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(err) => err.status_code(),
            ApiError::Query(err) => err.status_code(),
            ApiError::MethodNotAllowed(err) => err.status_code(),
            ApiError::NotFound(err) => err.status_code(),
            ApiError::CatalogUnavailable(err) => err.status_code(),
            ApiError::RefreshInProgress(err) => err.status_code(),
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let message = match error.verbosity() {
            ErrorVerbosity::None => "",
            _ => error.message(),
        };

        ApiErrorResponse { error, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct InternalServerError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            verbosity,
            internal_server_error,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Debug, Serialize)]
pub struct QueryError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    query_error_reason: Option<String>,
    query_expected_schema: Option<String>,
}

impl QueryError {
    pub fn new(
        verbosity: ErrorVerbosity,
        query_error_reason: String,
        query_expected_schema: String,
    ) -> Self {
        let (query_error_reason, query_expected_schema) =
            match verbosity.should_generate_error_reason() {
                true => (Some(query_error_reason), Some(query_expected_schema)),
                false => (None, None),
            };

        QueryError {
            verbosity,
            query_error_reason,
            query_expected_schema,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Serialize)]
pub struct MethodNotAllowedError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl MethodNotAllowedError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        MethodNotAllowedError { verbosity }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

#[derive(Debug, Serialize)]
pub struct NotFoundError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl NotFoundError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        NotFoundError { verbosity }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

#[derive(Debug, Serialize)]
pub enum CatalogUnavailableErrorType {
    Loading,
    Failed,
}

#[derive(Debug, Serialize)]
pub struct CatalogUnavailableError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
    catalog_unavailable_error_type: CatalogUnavailableErrorType,
}

impl CatalogUnavailableError {
    pub fn new(
        verbosity: ErrorVerbosity,
        catalog_unavailable_error_type: CatalogUnavailableErrorType,
    ) -> Self {
        CatalogUnavailableError {
            verbosity,
            catalog_unavailable_error_type,
        }
    }

    /// `None` if the phase holds a catalog.
    pub fn from_phase(verbosity: ErrorVerbosity, phase: &Phase) -> Option<Self> {
        let error_type = match phase {
            Phase::Ready(_) => return None,
            Phase::Loading => CatalogUnavailableErrorType::Loading,
            Phase::Failed => CatalogUnavailableErrorType::Failed,
        };

        Some(Self::new(verbosity, error_type))
    }

    fn message(&self) -> &'static str {
        match self.catalog_unavailable_error_type {
            CatalogUnavailableErrorType::Loading => LOADING_MESSAGE,
            CatalogUnavailableErrorType::Failed => FETCH_FAILED_MESSAGE,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshInProgressError {
    #[serde(skip)]
    verbosity: ErrorVerbosity,
}

impl RefreshInProgressError {
    pub fn new(verbosity: ErrorVerbosity) -> Self {
        RefreshInProgressError { verbosity }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::CONFLICT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_full_verbosity_generates_reasons() {
        let error = QueryError::new(
            ErrorVerbosity::Message,
            "reason".to_string(),
            "schema".to_string(),
        );
        assert!(error.query_error_reason.is_none());

        let error = QueryError::new(
            ErrorVerbosity::Full,
            "reason".to_string(),
            "schema".to_string(),
        );
        assert_eq!(error.query_error_reason.as_deref(), Some("reason"));
    }

    #[test]
    fn catalog_unavailable_follows_phase() {
        assert!(CatalogUnavailableError::from_phase(
            ErrorVerbosity::Full,
            &Phase::Ready(Default::default())
        )
        .is_none());

        let error: ApiError =
            CatalogUnavailableError::from_phase(ErrorVerbosity::Full, &Phase::Failed)
                .unwrap()
                .into();

        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.message(), FETCH_FAILED_MESSAGE);
    }

    #[test]
    fn none_verbosity_is_no_content() {
        let response = ApiError::from(NotFoundError::new(ErrorVerbosity::None)).into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
