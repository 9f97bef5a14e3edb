use super::book::Book;

/// Genre selection sentinel that disables genre filtering.
pub const ALL_GENRES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreSelection {
    #[default]
    All,
    /// Lower-cased genre needle.
    Named(String),
}

impl GenreSelection {
    pub fn new(genre: &str) -> Self {
        match genre {
            ALL_GENRES => GenreSelection::All,
            genre => GenreSelection::Named(genre.to_lowercase()),
        }
    }
}

/// Normalized search text and genre selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    search: String,
    genre: GenreSelection,
}

impl Filter {
    pub fn new(search_text: &str, genre: &str) -> Self {
        Self {
            search: search_text.trim().to_lowercase(),
            genre: GenreSelection::new(genre),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_search(book) && self.matches_genre(book)
    }

    fn matches_search(&self, book: &Book) -> bool {
        if self.search.is_empty() {
            return true;
        }

        [&book.title, &book.author, &book.genre]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.search))
    }

    fn matches_genre(&self, book: &Book) -> bool {
        match &self.genre {
            GenreSelection::All => true,
            GenreSelection::Named(genre) => book.genre.to_lowercase().contains(genre.as_str()),
        }
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|book| self.matches(book)).collect()
    }
}

/// Books whose title, author or genre contains `search_text` and whose genre
/// contains `genre` (unless `genre` is [`ALL_GENRES`]), case-insensitively.
pub fn apply_filter<'a>(books: &'a [Book], search_text: &str, genre: &str) -> Vec<&'a Book> {
    Filter::new(search_text, genre).apply(books)
}
