use std::time::Duration;

use futures::future::try_join_all;
use serde::Deserialize;
use validator::Validate;

use super::{merge::Catalog, rating::RatingFallback, raw::VolumesResponse};

/// The only message users ever see when a fetch cycle fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to fetch volumes for topic `{topic}`: {source}")]
    Fetch {
        topic: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Catalog service answered topic `{topic}` with status {status}")]
    Status {
        topic: String,
        status: reqwest::StatusCode,
    },
    #[error("Failed to parse volumes for topic `{topic}`: {source}")]
    Parse {
        topic: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CatalogConfig {
    #[serde(default = "CatalogConfig::default_endpoint")]
    #[validate(url)]
    pub endpoint: String,
    #[serde(default = "CatalogConfig::default_topics")]
    #[validate(length(min = 1, message = "At least one topic is required"))]
    pub topics: Vec<String>,
    #[serde(default = "CatalogConfig::default_max_results_per_query")]
    #[validate(range(min = 1, max = 40, message = "Must be between 1 and 40"))]
    pub max_results_per_query: u8,
    #[serde(default = "CatalogConfig::default_max_books")]
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub max_books: usize,
    #[serde(default = "CatalogConfig::default_request_timeout_secs")]
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub request_timeout_secs: u64,
    /// `None` draws a random rating in 3..=5 for books without one.
    #[serde(default)]
    #[validate(range(min = 3.0, max = 5.0, message = "Must be between 3 and 5"))]
    pub fixed_missing_rating: Option<f64>,
}

impl CatalogConfig {
    fn default_endpoint() -> String {
        "https://www.googleapis.com/books/v1/volumes".to_string()
    }

    fn default_topics() -> Vec<String> {
        vec![
            "fiction".to_string(),
            "science".to_string(),
            "programming".to_string(),
        ]
    }

    fn default_max_results_per_query() -> u8 {
        20
    }

    fn default_max_books() -> usize {
        30
    }

    fn default_request_timeout_secs() -> u64 {
        10
    }

    pub fn rating_fallback(&self) -> RatingFallback {
        RatingFallback::from_fixed(self.fixed_missing_rating)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            topics: Self::default_topics(),
            max_results_per_query: Self::default_max_results_per_query(),
            max_books: Self::default_max_books(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            fixed_missing_rating: None,
        }
    }
}

/// Client for the catalog service's volumes search.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    config: CatalogConfig,
    http_client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self::with_http_client(config, http_client))
    }

    pub fn with_http_client(config: CatalogConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, topic: &str) -> Result<VolumesResponse, CatalogError> {
        let response = self
            .http_client
            .get(&self.config.endpoint)
            .query(&[
                ("q", topic.to_string()),
                ("maxResults", self.config.max_results_per_query.to_string()),
            ])
            .send()
            .await
            .map_err(|source| CatalogError::Fetch {
                topic: topic.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                topic: topic.to_string(),
                status,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Fetch {
                topic: topic.to_string(),
                source,
            })?;

        let volumes = serde_json::from_slice::<VolumesResponse>(&bytes).map_err(|source| {
            CatalogError::Parse {
                topic: topic.to_string(),
                source,
            }
        })?;

        tracing::debug!(items = volumes.items.len(), "Fetched");

        Ok(volumes)
    }

    /// Runs one fetch cycle: every topic is queried at once and the cycle
    /// fails as a whole if any query fails.
    #[tracing::instrument(skip_all)]
    pub async fn fetch_catalog(&self) -> Result<Catalog, CatalogError> {
        let responses =
            try_join_all(self.config.topics.iter().map(|topic| self.search(topic))).await?;

        let catalog = Catalog::from_responses(
            responses,
            self.config.max_books,
            &self.config.rating_fallback(),
        );

        tracing::info!(books = catalog.len(), "Catalog fetched");

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CatalogConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.topics, ["fiction", "science", "programming"]);
        assert_eq!(config.max_results_per_query, 20);
        assert_eq!(config.max_books, 30);
        assert_eq!(config.rating_fallback(), RatingFallback::Random);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config: CatalogConfig = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config.endpoint, CatalogConfig::default().endpoint);
        assert_eq!(config.max_books, 30);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = CatalogConfig {
            max_results_per_query: 41,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CatalogConfig {
            topics: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CatalogConfig {
            fixed_missing_rating: Some(1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn fixed_missing_rating() {
        let config = CatalogConfig {
            fixed_missing_rating: Some(3.5),
            ..Default::default()
        };

        assert!(config.validate().is_ok());
        assert_eq!(config.rating_fallback(), RatingFallback::Fixed(3.5));
    }
}
