// File: ./src/mobile.rs
use crate::client::SearchClient;
use crate::config::Config;
use crate::home::HomeController;
use crate::model::{LoadingState, PlantSummary};
use crate::paths::AppPaths;
use crate::search::SearchController;
use std::sync::Arc;
use tokio::sync::Mutex;

#[cfg(target_os = "android")]
use android_logger::Config as LogConfig;
#[cfg(target_os = "android")]
use log::LevelFilter;

#[derive(Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    Generic(String),
}
impl From<String> for MobileError {
    fn from(e: String) -> Self {
        Self::Generic(e)
    }
}
impl From<&str> for MobileError {
    fn from(e: &str) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<anyhow::Error> for MobileError {
    fn from(e: anyhow::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
impl std::fmt::Display for MobileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MobileError::Generic(s) => write!(f, "{}", s),
        }
    }
}
impl std::error::Error for MobileError {}

// --- DTOs ---

#[derive(uniffi::Record)]
pub struct MobilePlant {
    pub id: u64,
    pub common_name: String,
    pub scientific_name: Vec<String>,
    pub cycle: Option<String>,
    pub watering: Option<String>,
    pub sunlight: Vec<String>,
    pub image_url: Option<String>,
    pub is_saved: bool,
}

#[derive(uniffi::Enum)]
pub enum MobileLoadingState {
    Idle,
    Loading,
    Success { plants: Vec<MobilePlant> },
    Error { message: String },
}

#[derive(uniffi::Record)]
pub struct MobileConfig {
    pub has_api_key: bool,
    pub base_url: String,
    pub timeout_secs: u64,
}

fn plant_to_mobile(p: &PlantSummary, home: &HomeController) -> MobilePlant {
    MobilePlant {
        id: p.id,
        common_name: p.common_name.clone(),
        scientific_name: p.scientific_name.clone(),
        cycle: p.cycle.clone(),
        watering: p.watering.clone(),
        sunlight: p.sunlight.clone().unwrap_or_default(),
        image_url: p.image_url().map(str::to_string),
        is_saved: home.contains(p.id),
    }
}

fn state_to_mobile(state: &LoadingState, home: &HomeController) -> MobileLoadingState {
    match state {
        LoadingState::Idle => MobileLoadingState::Idle,
        LoadingState::Loading => MobileLoadingState::Loading,
        LoadingState::Success(list) => MobileLoadingState::Success {
            plants: list.iter().map(|p| plant_to_mobile(p, home)).collect(),
        },
        LoadingState::Error(message) => MobileLoadingState::Error {
            message: message.clone(),
        },
    }
}

// --- MAIN OBJECT ---

#[derive(uniffi::Object)]
pub struct FoliumMobile {
    search: Arc<Mutex<SearchController>>,
    home: Arc<Mutex<HomeController>>,
}

#[uniffi::export(async_runtime = "tokio")]
impl FoliumMobile {
    #[uniffi::constructor]
    pub fn new(files_dir: String) -> Self {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            LogConfig::default()
                .with_max_level(LevelFilter::Debug)
                .with_tag("FoliumRust"),
        );
        AppPaths::init_mobile_path(files_dir);
        let config = Config::load().unwrap_or_default();
        Self {
            search: Arc::new(Mutex::new(SearchController::from_config(&config))),
            home: Arc::new(Mutex::new(HomeController::new())),
        }
    }

    pub fn get_config(&self) -> MobileConfig {
        let c = Config::load().unwrap_or_default();
        MobileConfig {
            has_api_key: c.api_key.is_some_and(|k| !k.trim().is_empty()),
            base_url: c.base_url,
            timeout_secs: c.timeout_secs,
        }
    }

    /// Persists the key and hands a rebuilt client to the search controller.
    /// A search already running finishes with the previous key.
    pub async fn save_config(&self, api_key: String) -> Result<(), MobileError> {
        let mut c = Config::load().unwrap_or_default();
        c.api_key = Some(api_key);
        c.save().map_err(MobileError::from)?;

        self.search.lock().await.set_client(SearchClient::new(&c));
        Ok(())
    }

    pub async fn update_query(&self, text: String) {
        self.search.lock().await.update_query(text);
    }

    pub async fn query(&self) -> String {
        self.search.lock().await.query().to_string()
    }

    /// Resolves once the issued search finished; the returned state may belong
    /// to a newer search if one was started in the meantime.
    pub async fn search_plants(&self) -> MobileLoadingState {
        let handle = self.search.lock().await.search_plants();
        if let Err(e) = handle.await {
            log::warn!("Search task failed: {}", e);
        }
        self.loading_state().await
    }

    pub async fn loading_state(&self) -> MobileLoadingState {
        let state = self.search.lock().await.loading_state();
        let home = self.home.lock().await;
        state_to_mobile(&state, &home)
    }

    pub async fn saved_plants(&self) -> Vec<MobilePlant> {
        let home = self.home.lock().await;
        home.plants()
            .iter()
            .map(|p| plant_to_mobile(p, &home))
            .collect()
    }

    /// Saves a plant from the current search results.
    pub async fn save_plant(&self, id: u64) -> Result<bool, MobileError> {
        let state = self.search.lock().await.loading_state();
        let plant = state
            .plants()
            .and_then(|list| list.iter().find(|p| p.id == id))
            .cloned()
            .ok_or_else(|| MobileError::from(format!("Plant {} is not in the results", id)))?;
        Ok(self.home.lock().await.save(plant))
    }

    pub async fn remove_plant(&self, id: u64) -> bool {
        self.home.lock().await.remove(id).is_some()
    }
}
