//! Release-group facet, derived from the currently visible cards

use std::collections::HashSet;

use crate::controls::{self, ControlBar, SelectOption};
use crate::item::{Item, Listing};

/// Label of the catch-all group option
pub const ALL_GROUPS: &str = "All groups";

/// One selectable group: lowercased match value, original-case label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// Distinct non-empty release groups, sorted case-insensitively
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    options: Vec<FacetOption>,
}

impl FacetIndex {
    /// Groups are deduplicated by lowercase value; the first spelling seen is the label
    pub fn build<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut seen = HashSet::new();
        let mut options: Vec<FacetOption> = items
            .into_iter()
            .map(|item| item.attributes().release_group)
            .filter(|group| !group.is_empty())
            .filter_map(|group| {
                let value = group.to_lowercase();
                seen.insert(value.clone()).then_some(FacetOption { value, label: group })
            })
            .collect();

        options.sort_by(|a, b| a.value.cmp(&b.value));
        Self { options }
    }

    pub fn options(&self) -> &[FacetOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Select options: "All groups" first, then one per facet value
    pub fn select_options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption::new("", ALL_GROUPS))
            .chain(
                self.options
                    .iter()
                    .map(|o| SelectOption::new(o.value.clone(), o.label.clone())),
            )
            .collect()
    }
}

/// Rebuild the group selector from the visible cards.
///
/// The current selection survives if it is still offered, otherwise the
/// selector falls back to "All groups".
pub fn rebuild_group_selector(listing: &Listing, bar: &mut ControlBar) -> FacetIndex {
    let index = FacetIndex::build(listing.visible());
    if let Some(select) = bar.get_mut(controls::GROUP) {
        select.set_options(index.select_options());
    }
    tracing::debug!(groups = index.len(), "rebuilt group facet");
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> Item {
        Item::new(format!(r#"<div class="fit item"><h5>{title}</h5></div>"#))
    }

    #[test]
    fn test_build_sorted_distinct_non_empty() {
        let items = vec![
            card("A.Movie-zeta – 1 GB"),
            card("B.Movie-Alpha – 2 GB"),
            card("No group here – 3 GB"),
            card("C.Movie-ALPHA – 4 GB"),
            card("D.Movie-beta"),
        ];

        let index = FacetIndex::build(&items);
        let labels: Vec<&str> = index.options().iter().map(|o| o.label.as_str()).collect();
        let values: Vec<&str> = index.options().iter().map(|o| o.value.as_str()).collect();

        assert_eq!(labels, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(values, vec!["alpha", "beta", "zeta"]);
        assert!(!index.contains(""));
    }

    #[test]
    fn test_select_options_lead_with_all_groups() {
        let index = FacetIndex::build(&[card("X-GRP")]);
        let opts = index.select_options();
        assert_eq!(opts[0], SelectOption::new("", ALL_GROUPS));
        assert_eq!(opts[1], SelectOption::new("grp", "GRP"));
    }

    #[test]
    fn test_rebuild_uses_visible_items_only() {
        let mut listing = Listing::new(vec![card("X-Shown"), card("Y-Hidden")]);
        listing.items_mut()[1].set_visible(false);
        let mut bar = ControlBar::new();

        let index = rebuild_group_selector(&listing, &mut bar);
        assert_eq!(index.len(), 1);
        assert!(index.contains("shown"));
        assert_eq!(bar.get(controls::GROUP).unwrap().options().len(), 2);
    }

    #[test]
    fn test_rebuild_preserves_or_resets_selection() {
        let mut listing = Listing::new(vec![card("X-Keep"), card("Y-Other")]);
        let mut bar = ControlBar::new();
        rebuild_group_selector(&listing, &mut bar);
        bar.set_value(controls::GROUP, "keep");

        rebuild_group_selector(&listing, &mut bar);
        assert_eq!(bar.value(controls::GROUP), "keep");

        listing.items_mut()[0].set_visible(false);
        rebuild_group_selector(&listing, &mut bar);
        assert_eq!(bar.value(controls::GROUP), "");
    }
}
