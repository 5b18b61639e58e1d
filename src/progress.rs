//! Progress reporting for page loading

use std::time::Duration;
use tokio::time::Instant;

use crate::loader::{PageLimit, TerminationCause};

/// Events emitted by an aggregation session
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    Started { limit: PageLimit },
    PageLoaded { loaded: u32, limit: PageLimit },
    Finished { loaded: u32, cause: TerminationCause },
}

pub trait ProgressObserver {
    fn on_progress(&mut self, event: &Progress);
}

/// Observer that records every event
impl ProgressObserver for Vec<Progress> {
    fn on_progress(&mut self, event: &Progress) {
        self.push(event.clone());
    }
}

/// State of the progress bar shown under the control bar
#[derive(Debug, Clone)]
pub struct ProgressBar {
    visible: bool,
    width_pct: u32,
    label: String,
    percent: String,
    hide_delay: Duration,
    hide_at: Option<Instant>,
}

impl ProgressBar {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            visible: false,
            width_pct: 0,
            label: String::new(),
            percent: String::new(),
            hide_delay,
            hide_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn width_pct(&self) -> u32 {
        self.width_pct
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn percent(&self) -> &str {
        &self.percent
    }

    /// Apply a pending hide once its deadline has passed
    pub fn refresh(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.visible = false;
            self.width_pct = 0;
            self.hide_at = None;
        }
    }

    fn show_fraction(&mut self, loaded: u32, total: u32) {
        let total = total.max(1);
        let pct = (f64::from(loaded) / f64::from(total) * 100.0).round() as u32;
        self.width_pct = pct.min(100);
        self.label = format!("Page {} of {}", loaded + 1, total);
        self.percent = format!("{pct}%");
    }
}

impl ProgressObserver for ProgressBar {
    fn on_progress(&mut self, event: &Progress) {
        match event {
            Progress::Started { limit } => {
                self.visible = true;
                self.hide_at = None;
                self.show_fraction(0, limit.finite().unwrap_or(1));
            }
            Progress::PageLoaded { loaded, limit } => match limit.finite() {
                Some(total) => self.show_fraction(*loaded, total),
                None => {
                    self.width_pct = 100;
                    self.label = format!("{loaded} page(s) loaded...");
                    self.percent.clear();
                }
            },
            Progress::Finished { .. } => {
                self.width_pct = 100;
                self.percent = "100%".to_string();
                self.label = "Done!".to_string();
                self.hide_at = Some(Instant::now() + self.hide_delay);
            }
        }
    }
}

/// Transient status text next to the load button
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    text: Option<String>,
    expires_at: Option<Instant>,
}

impl StatusLine {
    /// Show `text` until cleared or replaced
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.expires_at = None;
    }

    /// Show `text` for `ttl`
    pub fn set_transient(&mut self, text: impl Into<String>, ttl: Duration) {
        self.text = Some(text.into());
        self.expires_at = Some(Instant::now() + ttl);
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn refresh(&mut self, now: Instant) {
        if self.expires_at.is_some_and(|at| now >= at) {
            self.text = None;
            self.expires_at = None;
        }
    }
}
