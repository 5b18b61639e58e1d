//! Client-side filtering and multi-page aggregation for release listings
//!
//! Provides the core behind a listing page's filter bar:
//! - Attribute extraction from loosely structured item cards
//! - Filter evaluation with a group facet kept consistent with visible items
//! - Persisted filter state behind a key-value port
//! - Sequential loading and merging of further listing pages
//! - Debounced re-evaluation on structural change

pub mod config;
pub mod controls;
pub mod criteria;
pub mod error;
pub mod extractors;
pub mod facets;
pub mod filter;
pub mod item;
pub mod loader;
pub mod progress;
pub mod scheduler;
pub mod store;
pub mod suite;

pub use config::SuiteConfig;
pub use controls::ControlBar;
pub use criteria::FilterCriteria;
pub use error::{Error, Result};
pub use extractors::{Category, ItemAttributes};
pub use facets::FacetIndex;
pub use filter::{evaluate, matches, FilterOutcome, ResultCounter};
pub use item::{Item, Listing};
pub use loader::{
    AggregationSession, HttpTransport, PageLimit, PageTransport, SessionReport, TerminationCause,
};
pub use progress::{Progress, ProgressBar, ProgressObserver};
pub use scheduler::{debounce_channel, ChangeNotifier, Debouncer};
pub use store::{FilterStateStore, JsonFileStore, KeyValueStore, MemoryStore};
pub use suite::FilterSuite;
