//! Size and release group, both parsed out of the card's `h5` title

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use super::css;

static SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)–\s*(\d+(?:\.\d+)?)\s*GB").unwrap());

static SIZE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*–\s*[\d.]+\s*(?:GB|MB)\s*$").unwrap());

pub fn title(document: &Html) -> String {
    css::first_text(document, "h5").unwrap_or_default()
}

/// `– 4.2 GB` in the title. `None` when the title carries no GB figure.
pub fn size_gb(title: &str) -> Option<f64> {
    SIZE.captures(title)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Last dash-separated segment of the title once the size suffix is gone.
///
/// Titles with a single segment have no group. Hyphens inside the human
/// readable part of the title are not disambiguated.
pub fn release_group(title: &str) -> String {
    let clean = SIZE_SUFFIX.replace(title, "");
    let parts: Vec<&str> = clean.trim().split(['-', '–']).collect();
    if parts.len() > 1 {
        parts.last().map(|g| g.trim().to_string()).unwrap_or_default()
    } else {
        String::new()
    }
}
