//! The filter suite: listing, control bar, persisted state and page loading
//! wired together the way the page drives them.

use std::sync::Arc;
use tokio::time::Instant;
use url::Url;

use crate::config::SuiteConfig;
use crate::controls::{self, ControlBar};
use crate::facets::{rebuild_group_selector, FacetIndex};
use crate::filter::{evaluate, FilterOutcome, ResultCounter};
use crate::item::Listing;
use crate::loader::{AggregationSession, LoadTrigger, PageLimit, PageTransport, SessionReport};
use crate::progress::{ProgressBar, StatusLine};
use crate::scheduler::Debouncer;
use crate::store::{FilterStateStore, KeyValueStore};
use crate::{Error, Result};

pub struct FilterSuite<S> {
    config: SuiteConfig,
    listing: Listing,
    controls: ControlBar,
    store: FilterStateStore<S>,
    progress: ProgressBar,
    status: StatusLine,
    trigger: Arc<LoadTrigger>,
    counter: ResultCounter,
}

impl<S: KeyValueStore> FilterSuite<S> {
    /// Build the group facet from the full listing, restore persisted
    /// control values, then run a first evaluation.
    pub fn new(listing: Listing, backend: S, config: SuiteConfig) -> Self {
        let store = FilterStateStore::new(backend, config.storage_key.clone());
        let progress = ProgressBar::new(config.progress_hide_delay());
        let total = listing.len();

        let mut suite = Self {
            config,
            listing,
            controls: ControlBar::new(),
            store,
            progress,
            status: StatusLine::default(),
            trigger: Arc::new(LoadTrigger::new()),
            counter: ResultCounter::Showing { visible: total, total },
        };

        rebuild_group_selector(&suite.listing, &mut suite.controls);
        let restored = suite.store.load(&mut suite.controls);
        tracing::debug!(restored, items = total, "filter suite initialised");
        suite.apply_filters();
        suite
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn controls(&self) -> &ControlBar {
        &self.controls
    }

    pub fn store(&self) -> &FilterStateStore<S> {
        &self.store
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn counter(&self) -> ResultCounter {
        self.counter
    }

    /// Shared handle to the load trigger, for rendering its disabled state
    pub fn load_trigger(&self) -> Arc<LoadTrigger> {
        Arc::clone(&self.trigger)
    }

    /// Evaluate the listing against the current controls and persist them
    pub fn apply_filters(&mut self) -> FilterOutcome {
        let outcome = evaluate(&mut self.listing, &mut self.controls);
        self.counter = outcome.counter;
        self.store.save(&self.controls);
        outcome
    }

    /// Text or select input on a control
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> FilterOutcome {
        self.controls.set_value(id, value);
        self.apply_filters()
    }

    /// Checkbox input on a control
    pub fn set_checked(&mut self, id: &str, checked: bool) -> FilterOutcome {
        self.controls.set_checked(id, checked);
        self.apply_filters()
    }

    /// Reset every control, forget the persisted state and re-evaluate
    pub fn clear(&mut self) -> FilterOutcome {
        self.store.clear(&mut self.controls);
        self.apply_filters()
    }

    pub fn rebuild_facets(&mut self) -> FacetIndex {
        rebuild_group_selector(&self.listing, &mut self.controls)
    }

    /// Load further listing pages, then refresh the facet and the filters.
    ///
    /// `location` is the URL of the page currently shown. Rejected while
    /// another load holds the trigger.
    pub async fn load_pages<T: PageTransport>(
        &mut self,
        transport: &T,
        location: &str,
    ) -> Result<SessionReport> {
        let trigger = Arc::clone(&self.trigger);
        let Some(_guard) = trigger.try_acquire() else {
            return Err(Error::LoadInProgress);
        };

        self.listing.hide_pagination();

        let origin = match Url::parse(location) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(location, error = %e, "cannot load pages");
                self.status.set("Error loading pages");
                return Err(e.into());
            }
        };

        let limit = PageLimit::parse(self.controls.value(controls::PAGE_LIMIT));
        let mut session = AggregationSession::new(transport, origin, limit, &self.config);
        let report = session.run(&mut self.listing, &mut self.progress).await;

        self.status.set_transient(
            format!("{} page(s) loaded", report.loaded),
            self.config.status_ttl(),
        );

        self.rebuild_facets();
        self.apply_filters();
        Ok(report)
    }

    /// Re-evaluate once per settled burst of change notifications
    pub async fn watch(&mut self, mut debouncer: Debouncer) -> usize {
        let mut runs = 0;
        while debouncer.next_settled().await {
            self.apply_filters();
            runs += 1;
        }
        runs
    }

    /// Apply timed display changes (progress hide, status expiry)
    pub fn refresh(&mut self, now: Instant) {
        self.progress.refresh(now);
        self.status.refresh(now);
    }
}
