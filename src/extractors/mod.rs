//! Attribute extraction from one item card
//!
//! Each module covers one family of attributes. Every function is total: a
//! missing or malformed element yields that field's default and never
//! affects the other fields.

pub mod badges;
pub mod category;
pub mod css;
pub mod rating;
pub mod title;

pub use category::Category;

use serde::Serialize;

use crate::item::Item;

/// Semantic fields of an item, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAttributes {
    pub has_dolby_vision: bool,
    pub has_hdr: bool,
    /// 0..=10, 0 when no rating is shown
    pub rating: f64,
    /// `None` when the title has no GB figure (distinct from 0)
    pub size_gb: Option<f64>,
    /// Empty when the title has no group segment
    pub release_group: String,
    /// e.g. `1080p`, empty when no badge matched
    pub resolution: String,
    pub category: Category,
}

impl ItemAttributes {
    pub fn extract(item: &Item) -> Self {
        let document = item.fragment();
        let title = title::title(&document);
        let text = item.text();

        Self {
            has_dolby_vision: badges::has_dolby_vision(&document),
            has_hdr: badges::has_hdr(&document),
            rating: rating::rating(&text),
            size_gb: title::size_gb(&title),
            release_group: title::release_group(&title),
            resolution: badges::resolution(&document),
            category: category::category(&document),
        }
    }
}
