//! The search widget controller.
//!
//! Single owner of everything a search touches: the loaded dataset, the
//! results panel and the running clocks. Nothing here is global; the binary
//! builds one widget at startup and drives it from its input loop.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tripfinder_core::{
    Dataset, DatasetProvider, Error, MatchLimits, Result, match_keyword, normalize_keyword,
};

use crate::clock::{ClockRefresher, WallClock};
use crate::panel::ResultsPanel;

/// Notice shown when a search is submitted before the dataset is available.
pub const DATA_UNAVAILABLE_NOTICE: &str = "Data not loaded yet. Try again in a moment.";

#[derive(Debug, Clone, Default)]
pub enum DatasetState {
    #[default]
    Loading,
    Ready(Arc<Dataset>),
    /// Load failed; holds the error message. Only a restart recovers.
    Failed(String),
}

/// What a submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Dataset not loaded; nothing was searched.
    DataUnavailable,
    /// Blank input; nothing was searched and the panel is untouched.
    Ignored,
    NoResults,
    Rendered { cards: usize, clocks: usize },
}

impl SubmitOutcome {
    /// Blocking notice the user must see, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        match self {
            Self::DataUnavailable => Some(DATA_UNAVAILABLE_NOTICE),
            Self::Ignored | Self::NoResults | Self::Rendered { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct SearchWidget {
    dataset: DatasetState,
    limits: MatchLimits,
    input: String,
    panel: ResultsPanel,
    refresher: ClockRefresher,
}

impl SearchWidget {
    #[must_use]
    pub fn new(limits: MatchLimits) -> Self {
        Self {
            dataset: DatasetState::Loading,
            limits,
            input: String::new(),
            panel: ResultsPanel::new(),
            refresher: ClockRefresher::default(),
        }
    }

    /// Replace the clock source and refresh period.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn WallClock>, period: Duration) -> Self {
        self.refresher.cancel_all();
        self.refresher = ClockRefresher::new(clock, period);
        self
    }

    /// Load the dataset once. Failure is logged and remembered, not returned:
    /// later submits report it through [`SubmitOutcome::DataUnavailable`].
    pub async fn load_from(&mut self, provider: &dyn DatasetProvider) -> bool {
        match provider.fetch().await {
            Ok(dataset) => {
                self.set_dataset(dataset);
                true
            }
            Err(e) => {
                error!("Failed to load dataset from {}: {e}", provider.describe());
                self.dataset = DatasetState::Failed(e.to_string());
                false
            }
        }
    }

    pub fn set_dataset(&mut self, dataset: Dataset) {
        info!(
            "Dataset loaded: {} beaches, {} temples, {} countries ({} cities)",
            dataset.beaches.len(),
            dataset.temples.len(),
            dataset.countries.len(),
            dataset.city_count()
        );
        self.dataset = DatasetState::Ready(Arc::new(dataset));
    }

    #[must_use]
    pub const fn dataset_state(&self) -> &DatasetState {
        &self.dataset
    }

    pub fn dataset(&self) -> Result<Arc<Dataset>> {
        match &self.dataset {
            DatasetState::Ready(dataset) => Ok(Arc::clone(dataset)),
            DatasetState::Loading | DatasetState::Failed(_) => Err(Error::DatasetUnavailable),
        }
    }

    /// Text currently in the search box.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Run a search for `raw` and re-render the panel.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        raw.clone_into(&mut self.input);

        let Ok(dataset) = self.dataset() else {
            warn!("Search for {raw:?} rejected: dataset not loaded");
            return SubmitOutcome::DataUnavailable;
        };

        let Some(key) = normalize_keyword(raw) else {
            return SubmitOutcome::Ignored;
        };

        let matches = match_keyword(&key, &dataset, self.limits);
        info!(
            "Search {raw:?} -> key {key:?}: {} match(es)",
            matches.len()
        );

        self.panel.render(&matches, &mut self.refresher);

        if matches.is_empty() {
            SubmitOutcome::NoResults
        } else {
            SubmitOutcome::Rendered {
                cards: matches.len(),
                clocks: self.refresher.active_count(),
            }
        }
    }

    /// Clear the search box, stop every clock and blank the panel.
    pub fn reset(&mut self) {
        self.input.clear();
        self.panel.clear(&mut self.refresher);
    }

    #[must_use]
    pub const fn panel(&self) -> &ResultsPanel {
        &self.panel
    }

    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.refresher.active_count()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        self.panel.to_html()
    }
}
