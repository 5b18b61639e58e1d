//! Filter criteria snapshot, rebuilt from the control bar on every evaluation

use regex::Regex;
use std::sync::LazyLock;

use crate::controls::{self, ControlBar};
use crate::extractors::Category;

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub only_dolby_vision: bool,
    pub only_hdr: bool,
    /// Exact resolution label, empty for any
    pub resolution: String,
    pub category: Option<Category>,
    pub min_rating: f64,
    pub min_size_gb: f64,
    /// `f64::INFINITY` when unset
    pub max_size_gb: f64,
    /// Lowercased and trimmed, empty for any
    pub group: String,
    /// Lowercased and trimmed, empty for any
    pub search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            only_dolby_vision: false,
            only_hdr: false,
            resolution: String::new(),
            category: None,
            min_rating: 0.0,
            min_size_gb: 0.0,
            max_size_gb: f64::INFINITY,
            group: String::new(),
            search: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn from_controls(bar: &ControlBar) -> Self {
        Self {
            only_dolby_vision: bar.checked(controls::DOLBY_VISION),
            only_hdr: bar.checked(controls::HDR),
            resolution: bar.value(controls::RESOLUTION).to_string(),
            category: Category::parse(bar.value(controls::CATEGORY)),
            min_rating: non_negative(bar.value(controls::MIN_RATING)),
            min_size_gb: non_negative(bar.value(controls::MIN_SIZE)),
            max_size_gb: parse_number_prefix(bar.value(controls::MAX_SIZE))
                .filter(|v| *v > 0.0)
                .unwrap_or(f64::INFINITY),
            group: normalize(bar.value(controls::GROUP)),
            search: normalize(bar.value(controls::SEARCH)),
        }
    }

    /// Same criteria with the group filter lifted
    pub fn without_group(&self) -> Self {
        Self {
            group: String::new(),
            ..self.clone()
        }
    }

    /// Whether any field differs from "show everything"
    pub fn is_active(&self) -> bool {
        self.only_dolby_vision
            || self.only_hdr
            || !self.resolution.is_empty()
            || self.category.is_some()
            || self.min_rating > 0.0
            || self.min_size_gb > 0.0
            || self.max_size_gb < f64::INFINITY
            || !self.group.is_empty()
            || !self.search.is_empty()
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn non_negative(value: &str) -> f64 {
    parse_number_prefix(value).filter(|v| *v > 0.0).unwrap_or(0.0)
}

/// Leading decimal number of a control value, `"7.5 stars"` -> 7.5
pub fn parse_number_prefix(value: &str) -> Option<f64> {
    NUMBER_PREFIX
        .captures(value)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
