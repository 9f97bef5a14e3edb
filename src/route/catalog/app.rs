use axum::{
    routing::{get, post},
    Router,
};

use crate::state::ApiState;

pub fn app() -> Router<ApiState> {
    Router::<ApiState>::new()
        .route("/", get(super::page::catalog_page))
        .route("/api/books", get(super::books::list_books))
        .route("/api/genres", get(super::genres::list_genres))
        .route("/api/refresh", post(super::refresh::refresh_catalog))
}
