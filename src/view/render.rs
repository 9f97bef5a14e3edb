use minijinja::{context, Environment};
use serde::Serialize;

use super::CatalogView;
use crate::{
    catalog::{Book, FETCH_FAILED_MESSAGE},
    state::Phase,
};

const TEMPLATE_NAME: &str = "catalog.html";
const TEMPLATE: &str = include_str!("catalog.html");

const DESCRIPTION_LIMIT: usize = 150;
const MAX_STARS: usize = 5;

pub const LOADING_MESSAGE: &str = "Loading books...";

#[derive(Debug, thiserror::Error)]
#[error("Failed to render the catalog view: {0}")]
pub struct RenderError(#[from] minijinja::Error);

/// `floor(rating)` filled stars followed by empty ones, five in total.
pub fn render_stars(rating: f64) -> String {
    let filled = (rating.floor().max(0.0) as usize).min(MAX_STARS);

    "★".repeat(filled) + &"☆".repeat(MAX_STARS - filled)
}

pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((end, _)) => format!("{}...", &description[..end]),
        None => description.to_string(),
    }
}

pub fn count_label(count: usize) -> String {
    match count {
        1 => "1 book found".to_string(),
        n => format!("{n} books found"),
    }
}

#[derive(Debug, Serialize)]
struct BookCard<'a> {
    title: &'a str,
    author: &'a str,
    genre: &'a str,
    stars: String,
    rating: String,
    description: String,
    image_url: &'a str,
    published_date: &'a str,
}

impl<'a> From<&'a Book> for BookCard<'a> {
    fn from(book: &'a Book) -> Self {
        BookCard {
            title: &book.title,
            author: &book.author,
            genre: &book.genre,
            stars: render_stars(book.rating),
            rating: book.rating.to_string(),
            description: truncate_description(&book.description),
            image_url: &book.image_url,
            published_date: &book.published_date,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenreOption {
    name: String,
    selected: bool,
}

/// Renders [`CatalogView`]s as HTML pages. Output is HTML-escaped.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE)?;

        Ok(Self { env })
    }

    #[tracing::instrument(skip_all)]
    pub fn render(&self, view: &CatalogView) -> Result<String, RenderError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;

        let phase = match view.phase() {
            Phase::Loading => "loading",
            Phase::Ready(_) => "ready",
            Phase::Failed => "failed",
        };

        let message = match view.phase() {
            Phase::Loading => LOADING_MESSAGE,
            Phase::Failed => FETCH_FAILED_MESSAGE,
            Phase::Ready(_) => "",
        };

        let filtered = view.filtered();
        let cards: Vec<BookCard> = filtered.iter().copied().map(BookCard::from).collect();

        let genres: Vec<GenreOption> = view
            .genres()
            .into_iter()
            .map(|name| GenreOption {
                selected: name == view.genre(),
                name,
            })
            .collect();

        let html = template.render(context! {
            phase,
            message,
            search => view.search(),
            genres,
            count_label => count_label(cards.len()),
            cards,
        })?;

        tracing::trace!(books = filtered.len(), "Rendered");

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;

    fn book(id: &str, title: &str, genre: &str, rating: f64, description: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: "An Author".to_string(),
            genre: genre.to_string(),
            rating,
            description: description.to_string(),
            image_url: "http://img/1".to_string(),
            published_date: "2001".to_string(),
        }
    }

    fn ready(books: Vec<Book>) -> Phase {
        Phase::Ready(Arc::new(Catalog::from_books(books, 30)))
    }

    #[test]
    fn stars_floor_the_rating() {
        assert_eq!(render_stars(3.7), "★★★☆☆");
        assert_eq!(render_stars(5.0), "★★★★★");
        assert_eq!(render_stars(0.0), "☆☆☆☆☆");
    }

    #[test]
    fn description_is_cut_at_150_chars() {
        let short = "a".repeat(150);
        assert_eq!(truncate_description(&short), short);

        let long = "é".repeat(151);
        let truncated = truncate_description(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 153);
    }

    #[test]
    fn description_limit_counts_scalar_values() {
        // 150 emoji are 300 UTF-16 units but still within the limit.
        let emoji = "📚".repeat(150);
        assert_eq!(truncate_description(&emoji), emoji);

        let longer = "📚".repeat(151);
        assert_eq!(truncate_description(&longer), format!("{emoji}..."));
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "0 books found");
        assert_eq!(count_label(1), "1 book found");
        assert_eq!(count_label(12), "12 books found");
    }

    #[test]
    fn renders_cards_and_escapes() {
        let renderer = Renderer::new().unwrap();
        let view = CatalogView::new(ready(vec![
            book("1", "Rust & <Friends>", "Computers", 4.5, "Ownership."),
            book("2", "Dune", "Fiction", 3.0, "Spice."),
        ]));

        let html = renderer.render(&view).unwrap();

        assert!(html.contains("Rust &amp; &lt;Friends&gt;"));
        assert!(html.contains("2 books found"));
        assert!(html.contains("★★★★☆"));
        assert!(html.contains("(4.5)"));
        assert!(html.contains("Published: 2001"));
        assert!(html.contains("by An Author"));
    }

    #[test]
    fn renders_empty_state() {
        let renderer = Renderer::new().unwrap();
        let view = CatalogView::new(ready(vec![book("1", "Dune", "Fiction", 3.0, "")]))
            .with_search("nothing matches");

        let html = renderer.render(&view).unwrap();

        assert!(html.contains("0 books found"));
        assert!(html.contains("No books found matching your criteria."));
    }

    #[test]
    fn marks_selected_genre() {
        let renderer = Renderer::new().unwrap();
        let view = CatalogView::new(ready(vec![book("1", "Dune", "Fiction", 3.0, "")]))
            .with_genre("Fiction");

        let html = renderer.render(&view).unwrap();

        assert!(html.contains(r#"<option value="Fiction" selected>"#));
        assert!(html.contains("1 book found"));
    }

    #[test]
    fn renders_loading_and_failure_messages() {
        let renderer = Renderer::new().unwrap();

        let html = renderer.render(&CatalogView::new(Phase::Loading)).unwrap();
        assert!(html.contains(LOADING_MESSAGE));

        let html = renderer.render(&CatalogView::new(Phase::Failed)).unwrap();
        assert!(html.contains(FETCH_FAILED_MESSAGE));
        assert!(!html.contains("books found"));
    }
}
