//! Item cards and the live listing that holds them

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::extractors::{css, ItemAttributes};
use crate::{Error, Result};

/// One release card
pub const ITEM_SELECTOR: &str = ".fit.item";
/// Grid wrapping the cards inside a listing page
pub const GRID_SELECTOR: &str = ".item_2.items";
/// Listing containers, tried in order
pub const CONTAINER_SELECTORS: [&str; 2] = ["div.peliculas", ".box"];
/// Pagination block, never merged into the live listing
pub const PAGINATION_ID: &str = "paginador";

static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^(\s*<[^>]*?)\s+style\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

/// A card's markup plus its current visibility
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    html: String,
    hidden: bool,
}

impl Item {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            hidden: false,
        }
    }

    /// Deep copy of a parsed card, minus any inline style left by earlier filtering
    pub fn from_element(element: ElementRef<'_>) -> Self {
        Self::new(strip_inline_style(&element.html()))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn fragment(&self) -> Html {
        Html::parse_fragment(&self.html)
    }

    /// All text of the card, as rendered
    pub fn text(&self) -> String {
        css::element_text(self.fragment().root_element())
    }

    pub fn attributes(&self) -> ItemAttributes {
        ItemAttributes::extract(self)
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.hidden = !visible;
    }
}

/// Drop the `style` attribute of the outermost tag
fn strip_inline_style(html: &str) -> String {
    STYLE_ATTR.replacen(html, 1, "$1").into_owned()
}

fn inside_pagination(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().id() == Some(PAGINATION_ID))
}

/// Cards under `scope` in document order, skipping anything inside the pagination block
fn collect_items(scope: ElementRef<'_>) -> Vec<Item> {
    let Ok(selector) = Selector::parse(ITEM_SELECTOR) else {
        return vec![];
    };

    scope
        .select(&selector)
        .filter(|el| !inside_pagination(el))
        .map(Item::from_element)
        .collect()
}

/// Cards of a fetched listing page
pub fn page_items(html: &str) -> Vec<Item> {
    let document = Html::parse_document(html);
    let grid = css::select_first(&document, GRID_SELECTOR).unwrap_or_else(|| document.root_element());
    collect_items(grid)
}

/// The live, ordered collection of cards on the listing page
#[derive(Debug, Clone, Default)]
pub struct Listing {
    items: Vec<Item>,
    pagination_hidden: bool,
}

impl Listing {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            pagination_hidden: false,
        }
    }

    /// Locate the listing container in an origin page and take its cards
    pub fn from_document(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let container = CONTAINER_SELECTORS
            .iter()
            .find_map(|sel| css::select_first(&document, sel))
            .ok_or(Error::ContainerNotFound)?;

        Ok(Self::new(collect_items(container)))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_visible()).count()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.is_visible())
    }

    /// Append cards after the existing ones, keeping their order
    pub fn append(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    pub fn hide_pagination(&mut self) {
        self.pagination_hidden = true;
    }

    pub fn pagination_hidden(&self) -> bool {
        self.pagination_hidden
    }
}
