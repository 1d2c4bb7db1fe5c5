//! Application state behind the tool surface.
//!
//! [`ChefApp`] owns the outcome of configuration loading, the generation panel
//! and the two backends. A missing configuration is kept as an error value so
//! every action can answer with a notice without touching the network.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::{
    config::{ChefConfig, DisplaySettings},
    error::ChefError,
    store::{RecentReader, SupabaseStore},
    types::{RecipeRecord, RecipeResult},
    RecipeClient,
};
use crate::view::{GenerationView, LoadState, SubmitRejected};

/// Why a submit produced no recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    Rejected(SubmitRejected),
    Failed(ChefError),
}

impl SubmitError {
    pub fn notice(&self) -> String {
        match self {
            SubmitError::Rejected(reason) => reason.notice().to_string(),
            SubmitError::Failed(e) => e.notice(),
        }
    }
}

struct Backend {
    generator: RecipeClient,
    reader: RecentReader<SupabaseStore>,
    recent_limit: usize,
    display: DisplaySettings,
}

impl Backend {
    fn new(config: &ChefConfig) -> Result<Self, ChefError> {
        Ok(Self {
            generator: RecipeClient::new(config)?,
            reader: RecentReader::new(SupabaseStore::new(config)?),
            recent_limit: config.recent_limit,
            display: config.display,
        })
    }
}

#[derive(Clone)]
pub struct ChefApp {
    backend: Result<Arc<Backend>, ChefError>,
    generation: Arc<Mutex<GenerationView>>,
}

impl ChefApp {
    pub fn new(config: Result<ChefConfig, ChefError>) -> Self {
        let backend = config.and_then(|config| {
            tracing::info!(
                "Using project {} with key {}",
                config.base_url,
                config.key.preview()
            );
            Backend::new(&config).map(Arc::new)
        });

        if let Err(e) = &backend {
            tracing::warn!("Recipe tools are disabled: {}", e);
        }

        Self {
            backend,
            generation: Arc::new(Mutex::new(GenerationView::default())),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_ok()
    }

    pub fn display(&self) -> DisplaySettings {
        self.backend
            .as_ref()
            .map(|backend| backend.display)
            .unwrap_or_default()
    }

    fn view(&self) -> MutexGuard<'_, GenerationView> {
        self.generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the generation panel.
    pub fn current(&self) -> LoadState<RecipeResult> {
        self.view().state().clone()
    }

    pub fn can_submit(&self, title: &str) -> bool {
        self.view().can_submit(title)
    }

    /// Submits `title` to the generation function.
    ///
    /// Rejected while another submit is pending or when the title is blank.
    /// If the returned future is dropped mid-request the panel goes back to
    /// `Idle`.
    pub async fn generate(&self, title: &str) -> Result<RecipeResult, SubmitError> {
        let request = self.view().begin(title).map_err(|reason| {
            tracing::warn!("Generation rejected: {:?}", reason);
            SubmitError::Rejected(reason)
        })?;

        let backend = match &self.backend {
            Ok(backend) => Arc::clone(backend),
            Err(e) => {
                tracing::error!("Cannot generate recipe: {}", e);
                self.view().finish(Err(e.clone()));
                return Err(SubmitError::Failed(e.clone()));
            }
        };

        let mut pending = PendingGeneration {
            view: &self.generation,
            settled: false,
        };
        let outcome = backend.generator.generate_recipe(&request).await;
        pending.settle(outcome.clone());

        outcome.map_err(SubmitError::Failed)
    }

    /// Activates the recent panel: one fresh fetch, one terminal state.
    pub async fn recent(&self) -> LoadState<Vec<RecipeRecord>> {
        let backend = match &self.backend {
            Ok(backend) => Arc::clone(backend),
            Err(e) => {
                tracing::error!("Cannot load recent recipes: {}", e);
                return LoadState::Error(e.clone());
            }
        };

        let outcome = backend.reader.fetch_recent(backend.recent_limit).await;
        if let Err(e) = &outcome {
            tracing::error!("Loading recent recipes failed: {}", e);
        }
        LoadState::from_rows(outcome)
    }
}

/// Returns the panel to `Idle` if the request never settles.
struct PendingGeneration<'a> {
    view: &'a Mutex<GenerationView>,
    settled: bool,
}

impl PendingGeneration<'_> {
    fn settle(&mut self, outcome: Result<RecipeResult, ChefError>) {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finish(outcome);
        self.settled = true;
    }
}

impl Drop for PendingGeneration<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Generation request dropped before completion");
            self.view
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .abandon();
        }
    }
}
