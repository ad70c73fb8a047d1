// File: src/search.rs
use crate::client::{PlantSearch, SearchClient};
use crate::config::Config;
use crate::model::LoadingState;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns the query text and the loading state of the search screen.
///
/// Every `search_plants` call gets a new generation number. A finished request
/// only publishes its result if no newer search was issued in the meantime, so
/// the last search *issued* wins regardless of which response arrives last.
pub struct SearchController<C = SearchClient> {
    client: Arc<C>,
    query: String,
    state: Arc<watch::Sender<LoadingState>>,
    generation: Arc<AtomicU64>,
}

impl SearchController<SearchClient> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(SearchClient::new(config))
    }
}

impl<C> SearchController<C>
where
    C: PlantSearch + 'static,
{
    pub fn new(client: C) -> Self {
        let (state, _) = watch::channel(LoadingState::Idle);
        Self {
            client: Arc::new(client),
            query: String::new(),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replaces the client used by later searches. The query, the current state
    /// and any search already in flight are kept; that search still publishes
    /// its result unless a newer one is issued.
    pub fn set_client(&mut self, client: C) {
        self.client = Arc::new(client);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Stored verbatim; nothing is sent until `search_plants`.
    pub fn update_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn loading_state(&self) -> LoadingState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<LoadingState> {
        self.state.subscribe()
    }

    /// Switches to `Loading` before returning, then resolves the current query in
    /// a background task. Must be called from within a tokio runtime.
    ///
    /// The returned handle can be dropped; the request is not cancelled.
    pub fn search_plants(&self) -> JoinHandle<()> {
        let query = self.query.clone();

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadingState::Loading;
        });
        log::debug!("Search #{} started for {:?}", generation, query);

        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);

        tokio::spawn(async move {
            let next = match client.fetch_plants(&query).await {
                Ok(plants) => LoadingState::Success(plants),
                Err(e) => {
                    log::warn!("Search #{} for {:?} failed: {}", generation, query, e);
                    LoadingState::Error(e.to_string())
                }
            };

            // Compared under the channel's write lock, a newer search cannot slip in between
            let applied = state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) == generation {
                    *current = next;
                    true
                } else {
                    false
                }
            });
            if !applied {
                log::debug!("Search #{} superseded, result discarded", generation);
            }
        })
    }
}
