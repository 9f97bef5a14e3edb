//! The catalog view: the user's selections over a published phase, and its
//! presentation.

mod render;

pub use render::{
    count_label, render_stars, truncate_description, RenderError, Renderer, LOADING_MESSAGE,
};

use crate::{
    catalog::{Book, Filter, ALL_GENRES},
    state::Phase,
};

/// Explicit state of one catalog view.
///
/// Selections only move forward through [`CatalogView::with_search`] and
/// [`CatalogView::with_genre`]; everything else is derived.
#[derive(Debug, Clone)]
pub struct CatalogView {
    phase: Phase,
    search: String,
    genre: String,
}

impl CatalogView {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            search: String::new(),
            genre: ALL_GENRES.to_string(),
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn with_genre(self, genre: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            ..self
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn filtered(&self) -> Vec<&Book> {
        Filter::new(&self.search, &self.genre).apply(self.phase.books())
    }

    pub fn genres(&self) -> Vec<String> {
        crate::catalog::derived_genre_list(self.phase.books())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;

    fn book(id: &str, title: &str, genre: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: "Someone".to_string(),
            genre: genre.to_string(),
            rating: 4.0,
            description: String::new(),
            image_url: String::new(),
            published_date: String::new(),
        }
    }

    fn ready() -> Phase {
        Phase::Ready(Arc::new(Catalog::from_books(
            [
                book("1", "Dune", "Fiction"),
                book("2", "Cosmos", "Science"),
                book("3", "Foundation", "Fiction"),
            ],
            30,
        )))
    }

    #[test]
    fn defaults_show_everything() {
        let view = CatalogView::new(ready());

        assert_eq!(view.genre(), ALL_GENRES);
        assert_eq!(view.filtered().len(), 3);
        assert_eq!(view.genres(), ["All", "Fiction", "Science"]);
    }

    #[test]
    fn selections_narrow_the_view() {
        let view = CatalogView::new(ready()).with_genre("Fiction");
        assert_eq!(view.filtered().len(), 2);

        let view = view.with_search("found");
        let filtered = view.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "3");
    }

    #[test]
    fn failed_and_loading_have_no_books() {
        for phase in [Phase::Loading, Phase::Failed] {
            let view = CatalogView::new(phase);

            assert!(view.filtered().is_empty());
            assert_eq!(view.genres(), ["All"]);
        }
    }
}
