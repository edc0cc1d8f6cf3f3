//! Breed browsing view model.
//!
//! Holds the breed list fetched once per view, the subset currently shown
//! for the search box and the selected breed with its images. Search runs
//! locally over the cached list, debounced.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use felis_core::catalog::{Breed, BreedCatalog, BreedImage};
use felis_core::config::BrowseConfig;
use felis_core::error::{FelisError, Result};
use felis_core::search::{SearchDebouncer, filter_breeds};
use tokio_util::sync::CancellationToken;

/// Presentation state of one browsing view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserState {
    pub all_breeds: Vec<Breed>,
    pub displayed: Vec<Breed>,
    pub query: String,
    pub selected: Option<Breed>,
    pub images: Vec<BreedImage>,
    pub is_loading: bool,
    pub is_loading_details: bool,
}

type SharedState = Arc<Mutex<BrowserState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, BrowserState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// View model behind the breed list, search box and detail panel.
///
/// Must be created inside a tokio runtime. Once [`close`](Self::close) is
/// called (or the view is dropped) no further state changes are applied.
pub struct BreedBrowser {
    catalog: Arc<dyn BreedCatalog>,
    state: SharedState,
    cancel: CancellationToken,
    debouncer: SearchDebouncer,
    images_per_breed: u32,
    /// Bumped on every selection; only the latest one may apply its images.
    selection: AtomicU64,
}

impl BreedBrowser {
    pub fn new(
        catalog: Arc<dyn BreedCatalog>,
        config: &BrowseConfig,
        parent: &CancellationToken,
    ) -> Self {
        let cancel = parent.child_token();
        let state: SharedState = Arc::new(Mutex::new(BrowserState::default()));

        let search_state = state.clone();
        let debouncer =
            SearchDebouncer::spawn(config.search_debounce(), cancel.clone(), move |query| {
                apply_filter(&search_state, &query);
            });

        Self {
            catalog,
            state,
            cancel,
            debouncer,
            images_per_breed: config.images_per_breed,
            selection: AtomicU64::new(0),
        }
    }

    /// Fetches the full breed list and shows all of it.
    ///
    /// On failure the list stays empty and the error is returned.
    pub async fn load_all_breeds(&self) -> Result<usize> {
        lock(&self.state).is_loading = true;

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(FelisError::Cancelled),
            result = self.catalog.list_breeds() => result,
        };

        let mut state = lock(&self.state);
        state.is_loading = false;
        match result {
            Ok(breeds) => {
                tracing::debug!("[BreedBrowser] Loaded {} breeds", breeds.len());
                state.displayed = breeds.clone();
                state.all_breeds = breeds;
                Ok(state.all_breeds.len())
            }
            Err(e) => {
                tracing::error!("[BreedBrowser] Failed to load breeds: {}", e);
                state.all_breeds.clear();
                state.displayed.clear();
                Err(e)
            }
        }
    }

    /// Selects a breed from the loaded list and fetches its images.
    ///
    /// An empty id clears the selection. Image failures leave an empty image
    /// set and are not returned as errors. When selections overlap, only the
    /// most recent one applies its images.
    pub async fn select_breed(&self, breed_id: &str) -> Result<()> {
        let breed_id = breed_id.trim();

        let generation = {
            let mut state = lock(&self.state);
            let generation = self.selection.fetch_add(1, Ordering::SeqCst) + 1;
            state.images.clear();
            state.is_loading_details = false;

            if breed_id.is_empty() {
                state.selected = None;
                return Ok(());
            }

            let selected = state.all_breeds.iter().find(|b| b.id == breed_id).cloned();
            match selected {
                Some(breed) => state.selected = Some(breed),
                None => {
                    state.selected = None;
                    return Err(FelisError::not_found("Breed", breed_id));
                }
            }
            state.is_loading_details = true;
            generation
        };

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(FelisError::Cancelled),
            result = self.catalog.breed_images(breed_id, self.images_per_breed) => result,
        };

        let mut state = lock(&self.state);
        if self.selection.load(Ordering::SeqCst) != generation {
            tracing::debug!("[BreedBrowser] Discarding images of superseded selection {}", breed_id);
            return Ok(());
        }
        state.is_loading_details = false;
        state.images = result.unwrap_or_else(|e| {
            tracing::warn!("[BreedBrowser] Failed to load images for {}: {}", breed_id, e);
            Vec::new()
        });
        Ok(())
    }

    /// Records the search box value and schedules a debounced filter.
    pub fn on_search_input(&self, query: impl Into<String>) {
        let query = query.into();
        lock(&self.state).query = query.clone();
        self.debouncer.push(query);
    }

    /// Filters right away with the current search box value.
    pub fn perform_search(&self) {
        let query = lock(&self.state).query.clone();
        self.debouncer.trigger_now(query);
    }

    /// Stops the debouncer and discards results of in-flight calls.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn snapshot(&self) -> BrowserState {
        lock(&self.state).clone()
    }
}

impl Drop for BreedBrowser {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn apply_filter(state: &SharedState, query: &str) {
    let mut state = lock(state);
    state.displayed = filter_breeds(&state.all_breeds, query);
    tracing::debug!(
        "[BreedBrowser] {} of {} breeds match",
        state.displayed.len(),
        state.all_breeds.len()
    );
}
