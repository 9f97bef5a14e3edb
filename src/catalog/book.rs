use serde::{Deserialize, Serialize};

use super::{raw::Volume, rating::RatingFallback};

/// Shared by every volume without an id, so dedup keeps only the first.
pub const DEFAULT_ID: &str = "unknown";
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_GENRE: &str = "General";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_IMAGE_URL: &str = "https://via.placeholder.com/150x200?text=No+Image";
pub const DEFAULT_PUBLISHED_DATE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// In `[0, 5]`.
    pub rating: f64,
    pub description: String,
    pub image_url: String,
    pub published_date: String,
}

impl Book {
    /// Maps a raw volume into a book, substituting sentinels for absent fields.
    pub fn from_volume(volume: Volume, fallback: &RatingFallback) -> Self {
        let info = volume.volume_info;

        Book {
            id: volume.id.unwrap_or_else(|| DEFAULT_ID.to_string()),
            title: info.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            author: first(info.authors).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            genre: first(info.categories).unwrap_or_else(|| DEFAULT_GENRE.to_string()),
            rating: fallback.resolve(info.average_rating),
            description: info
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            image_url: info
                .image_links
                .and_then(|links| links.thumbnail)
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            published_date: info
                .published_date
                .unwrap_or_else(|| DEFAULT_PUBLISHED_DATE.to_string()),
        }
    }
}

fn first(values: Option<Vec<String>>) -> Option<String> {
    values.and_then(|values| values.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::raw::{ImageLinks, VolumeInfo};

    #[test]
    fn empty_volume_gets_sentinels() {
        let volume = Volume {
            id: Some("v1".to_string()),
            volume_info: VolumeInfo::default(),
        };

        let book = Book::from_volume(volume, &RatingFallback::Fixed(4.0));

        assert_eq!(
            book,
            Book {
                id: "v1".to_string(),
                title: DEFAULT_TITLE.to_string(),
                author: DEFAULT_AUTHOR.to_string(),
                genre: DEFAULT_GENRE.to_string(),
                rating: 4.0,
                description: DEFAULT_DESCRIPTION.to_string(),
                image_url: DEFAULT_IMAGE_URL.to_string(),
                published_date: DEFAULT_PUBLISHED_DATE.to_string(),
            }
        );
    }

    #[test]
    fn takes_first_author_and_category() {
        let volume = Volume {
            id: Some("v2".to_string()),
            volume_info: VolumeInfo {
                title: Some("Dune".to_string()),
                authors: Some(vec!["Frank Herbert".to_string(), "Other".to_string()]),
                categories: Some(vec!["Fiction".to_string(), "Classics".to_string()]),
                average_rating: Some(4.5),
                description: Some("Spice.".to_string()),
                image_links: Some(ImageLinks {
                    thumbnail: Some("http://img/dune".to_string()),
                }),
                published_date: Some("1965".to_string()),
            },
        };

        let book = Book::from_volume(volume, &RatingFallback::Random);

        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.genre, "Fiction");
        assert_eq!(book.rating, 4.5);
        assert_eq!(book.image_url, "http://img/dune");
        assert_eq!(book.published_date, "1965");
    }

    #[test]
    fn empty_author_list_falls_back() {
        let volume = Volume {
            id: Some("v3".to_string()),
            volume_info: VolumeInfo {
                authors: Some(vec![]),
                ..Default::default()
            },
        };

        let book = Book::from_volume(volume, &RatingFallback::Random);

        assert_eq!(book.author, DEFAULT_AUTHOR);
        assert!((3.0..=5.0).contains(&book.rating));
    }

    #[test]
    fn missing_id_gets_sentinel() {
        let volume = Volume {
            id: None,
            volume_info: VolumeInfo::default(),
        };

        let book = Book::from_volume(volume, &RatingFallback::Fixed(4.0));

        assert_eq!(book.id, DEFAULT_ID);
    }

    #[test]
    fn serializes_camel_case() {
        let volume = Volume {
            id: Some("v4".to_string()),
            volume_info: VolumeInfo::default(),
        };
        let book = Book::from_volume(volume, &RatingFallback::Fixed(3.0));

        let json = serde_json::to_value(&book).unwrap();

        assert!(json.get("imageUrl").is_some());
        assert!(json.get("publishedDate").is_some());
    }
}
