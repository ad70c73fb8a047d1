// File: src/model.rs
use serde::{Deserialize, Serialize};

/// Response body of the Perenual `species-list` endpoint.
///
/// Only the `data` array is read; pagination fields sent alongside it are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlantList {
    pub data: Vec<PlantSummary>,
}

impl PlantList {
    pub fn new(data: Vec<PlantSummary>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlantSummary> {
        self.data.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PlantSummary> {
        self.data.get(index)
    }
}

impl<'a> IntoIterator for &'a PlantList {
    type Item = &'a PlantSummary;
    type IntoIter = std::slice::Iter<'a, PlantSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// One search hit. `id`, `common_name` and `scientific_name` are required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSummary {
    pub id: u64,
    pub common_name: String,
    pub scientific_name: Vec<String>,
    pub other_name: Option<Vec<String>>,
    pub cycle: Option<String>,
    pub watering: Option<String>,
    pub sunlight: Option<Vec<String>>,
    pub default_image: Option<PlantImage>,
}

impl PlantSummary {
    pub fn new(id: u64, common_name: &str, scientific_name: Vec<String>) -> Self {
        Self {
            id,
            common_name: common_name.to_string(),
            scientific_name,
            other_name: None,
            cycle: None,
            watering: None,
            sunlight: None,
            default_image: None,
        }
    }

    /// First scientific name, or an empty string when the server sent none.
    pub fn primary_scientific_name(&self) -> &str {
        self.scientific_name
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.default_image.as_ref().and_then(PlantImage::best_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlantImage {
    pub image_id: Option<u64>,
    pub license: Option<u32>,
    pub license_name: Option<String>,
    pub license_url: Option<String>,
    pub original_url: Option<String>,
    pub regular_url: Option<String>,
    pub medium_url: Option<String>,
    pub small_url: Option<String>,
    pub thumbnail: Option<String>,
}

impl PlantImage {
    /// Largest available rendition.
    pub fn best_url(&self) -> Option<&str> {
        [
            &self.original_url,
            &self.regular_url,
            &self.medium_url,
            &self.small_url,
            &self.thumbnail,
        ]
        .into_iter()
        .find_map(|u| u.as_deref().filter(|s| !s.is_empty()))
    }
}

/// What the search screen should currently display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success(PlantList),
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn plants(&self) -> Option<&PlantList> {
        match self {
            LoadingState::Success(list) => Some(list),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_maps_snake_case_fields() {
        let json = r#"{
            "data": [{
                "id": 0,
                "common_name": "Cactus",
                "scientific_name": ["Cactaceae"],
                "cycle": "Perennial",
                "default_image": {
                    "license": 45,
                    "original_url": "https://example.org/o.jpg",
                    "small_url": null
                }
            }],
            "to": 30,
            "per_page": 30,
            "current_page": 1
        }"#;

        let list: PlantList = serde_json::from_str(json).expect("valid body");
        assert_eq!(list.len(), 1);
        let plant = &list.data[0];
        assert_eq!(plant.common_name, "Cactus");
        assert_eq!(plant.scientific_name, vec!["Cactaceae".to_string()]);
        assert_eq!(plant.cycle.as_deref(), Some("Perennial"));
        assert_eq!(plant.watering, None);
        let image = plant.default_image.as_ref().expect("image present");
        assert_eq!(image.small_url, None);
        assert_eq!(plant.image_url(), Some("https://example.org/o.jpg"));
    }

    #[test]
    fn test_decode_missing_common_name_fails() {
        let json = r#"{"data": [{"id": 1, "scientific_name": []}]}"#;
        assert!(serde_json::from_str::<PlantList>(json).is_err());
    }

    #[test]
    fn test_decode_null_image_and_empty_scientific_names() {
        let json = r#"{"data": [{"id": 7, "common_name": "Fern", "scientific_name": [], "default_image": null}]}"#;
        let list: PlantList = serde_json::from_str(json).expect("valid body");
        let plant = &list.data[0];
        assert_eq!(plant.primary_scientific_name(), "");
        assert_eq!(plant.image_url(), None);
    }

    #[test]
    fn test_decode_preserves_server_order() {
        let json = r#"{"data": [
            {"id": 3, "common_name": "C", "scientific_name": []},
            {"id": 1, "common_name": "A", "scientific_name": []},
            {"id": 3, "common_name": "C", "scientific_name": []}
        ]}"#;
        let list: PlantList = serde_json::from_str(json).expect("valid body");
        let ids: Vec<u64> = list.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 3]);
    }

    #[test]
    fn test_best_url_skips_empty_renditions() {
        let image = PlantImage {
            original_url: Some(String::new()),
            medium_url: Some("m.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(image.best_url(), Some("m.jpg"));
    }
}
