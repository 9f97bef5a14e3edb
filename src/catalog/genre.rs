use std::collections::HashSet;

use super::{book::Book, filter::ALL_GENRES};

/// [`ALL_GENRES`] followed by the distinct non-empty genres in first-seen order.
pub fn derived_genre_list(books: &[Book]) -> Vec<String> {
    let mut seen = HashSet::from([ALL_GENRES]);
    let mut genres = vec![ALL_GENRES.to_string()];

    for book in books {
        let genre = book.genre.as_str();

        if !genre.is_empty() && seen.insert(genre) {
            genres.push(genre.to_string());
        }
    }

    genres
}
