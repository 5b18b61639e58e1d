//! Listing category derived from the `.calidad4` section links

use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::css;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Movies,
    TvShows,
    TvPacks,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::TvShows => "tv-shows",
            Category::TvPacks => "tv-packs",
        }
    }

    /// Parse a control value; anything unknown means "no category filter"
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "movies" => Some(Category::Movies),
            "tv-shows" => Some(Category::TvShows),
            "tv-packs" => Some(Category::TvPacks),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packs win over shows; cards without section links are movies
pub fn category(document: &Html) -> Category {
    let hrefs = css::all_attrs(document, ".calidad4 a", "href");
    if hrefs.iter().any(|h| h.contains("tv-packs")) {
        Category::TvPacks
    } else if hrefs.iter().any(|h| h.contains("tv-shows")) {
        Category::TvShows
    } else {
        Category::Movies
    }
}
