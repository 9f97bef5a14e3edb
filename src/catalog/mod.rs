//! Book catalog: fetching volumes from the catalog service and deriving the
//! canonical set, its filtered views and its genre list.

mod book;
mod client;
mod filter;
mod genre;
mod merge;
mod rating;
mod raw;

pub use book::{
    Book, DEFAULT_AUTHOR, DEFAULT_ID, DEFAULT_DESCRIPTION, DEFAULT_GENRE, DEFAULT_IMAGE_URL,
    DEFAULT_PUBLISHED_DATE, DEFAULT_TITLE,
};
pub use client::{CatalogClient, CatalogConfig, CatalogError, FETCH_FAILED_MESSAGE};
pub use filter::{apply_filter, Filter, GenreSelection, ALL_GENRES};
pub use genre::derived_genre_list;
pub use merge::Catalog;
pub use rating::RatingFallback;
pub use raw::{ImageLinks, Volume, VolumeInfo, VolumesResponse};
