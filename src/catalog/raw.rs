use serde::{Deserialize, Serialize};

/// Body of a volumes search response.
///
/// A response without `items` is a valid, empty result.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub description: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}
