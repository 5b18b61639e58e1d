//! Quality badges: Dolby Vision marker, HDR badge and resolution label

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use super::css;

static RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d{3,4}p").unwrap());

/// The rating block's decorative span points at `dv.png` for Dolby Vision releases
pub fn has_dolby_vision(document: &Html) -> bool {
    css::first_attr(document, ".imdb_r span", "style")
        .is_some_and(|style| style.contains("dv.png"))
}

pub fn has_hdr(document: &Html) -> bool {
    css::exists(document, ".buttonhdr")
}

/// Text of the first `.calidad3` badge that looks like `720p`/`2160p`, trimmed
pub fn resolution(document: &Html) -> String {
    css::all_texts(document, ".calidad3")
        .into_iter()
        .find(|text| RESOLUTION.is_match(text))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}
