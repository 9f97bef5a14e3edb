use std::collections::HashSet;

use super::{book::Book, genre::derived_genre_list, rating::RatingFallback, raw::VolumesResponse};

/// The canonical set: deduplicated by id (first occurrence wins) and truncated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Flattens the responses in order, maps every volume to a [`Book`],
    /// drops repeated ids and keeps at most `max_books`.
    pub fn from_responses(
        responses: Vec<VolumesResponse>,
        max_books: usize,
        fallback: &RatingFallback,
    ) -> Self {
        let books = responses
            .into_iter()
            .flat_map(|response| response.items)
            .map(|volume| Book::from_volume(volume, fallback));

        Self::from_books(books, max_books)
    }

    pub fn from_books(books: impl IntoIterator<Item = Book>, max_books: usize) -> Self {
        let mut seen = HashSet::new();

        let books = books
            .into_iter()
            .filter(|book| seen.insert(book.id.clone()))
            .take(max_books)
            .collect();

        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn genres(&self) -> Vec<String> {
        derived_genre_list(&self.books)
    }
}
