use schemars::JsonSchema;
use serde::Deserialize;

use crate::{catalog::ALL_GENRES, state::Phase, view::CatalogView};

pub mod app;
pub mod books;
pub mod genres;
pub mod page;
pub mod refresh;

/// The user's selections, carried in the query string.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CatalogQuery {
    /// Matched against title, author and genre.
    #[serde(default)]
    pub search: String,
    /// `All` or a genre to match against.
    #[serde(default = "CatalogQuery::default_genre")]
    pub genre: String,
}

impl CatalogQuery {
    fn default_genre() -> String {
        ALL_GENRES.to_string()
    }

    pub fn into_view(self, phase: Phase) -> CatalogView {
        CatalogView::new(phase)
            .with_search(self.search)
            .with_genre(self.genre)
    }
}
