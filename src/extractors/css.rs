//! CSS selector helpers over a parsed item fragment
//!
//! Uses the scraper crate to select elements by CSS selectors. An invalid
//! selector behaves like a selector that matches nothing.

use scraper::{ElementRef, Html, Selector};

/// First element matching a CSS selector
pub fn select_first<'a>(document: &'a Html, selector_str: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector_str).ok()?;
    document.select(&selector).next()
}

/// Whether any element matches the selector
pub fn exists(document: &Html, selector_str: &str) -> bool {
    select_first(document, selector_str).is_some()
}

/// Concatenated text of the first matching element, untrimmed
pub fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    select_first(document, selector_str).map(element_text)
}

/// Attribute value of the first matching element
pub fn first_attr(document: &Html, selector_str: &str, attr_name: &str) -> Option<String> {
    select_first(document, selector_str)
        .and_then(|el| el.value().attr(attr_name).map(String::from))
}

/// Text content of every matching element, untrimmed
pub fn all_texts(document: &Html, selector_str: &str) -> Vec<String> {
    let selector = match Selector::parse(selector_str) {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    document.select(&selector).map(element_text).collect()
}

/// Attribute value of every matching element that carries it
pub fn all_attrs(document: &Html, selector_str: &str, attr_name: &str) -> Vec<String> {
    let selector = match Selector::parse(selector_str) {
        Ok(s) => s,
        Err(_) => return vec![],
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr_name).map(String::from))
        .collect()
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
