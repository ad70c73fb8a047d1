// File: src/home.rs
use crate::model::PlantSummary;

/// Plants the user picked from search results. Lives for the session only.
#[derive(Debug, Clone, Default)]
pub struct HomeController {
    plants: Vec<PlantSummary>,
}

impl HomeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plants(&self) -> &[PlantSummary] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.plants.iter().any(|p| p.id == id)
    }

    /// Returns false if a plant with the same id is already saved.
    pub fn save(&mut self, plant: PlantSummary) -> bool {
        if self.contains(plant.id) {
            return false;
        }
        self.plants.push(plant);
        true
    }

    pub fn remove(&mut self, id: u64) -> Option<PlantSummary> {
        let idx = self.plants.iter().position(|p| p.id == id)?;
        Some(self.plants.remove(idx))
    }
}
