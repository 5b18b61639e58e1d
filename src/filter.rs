//! Filter predicate and the two-pass visibility evaluation

use std::fmt;

use crate::controls::ControlBar;
use crate::criteria::FilterCriteria;
use crate::facets::{rebuild_group_selector, FacetIndex};
use crate::item::{Item, Listing};

/// Whether one card passes every criterion.
///
/// A card without a parseable size is never excluded by the size bounds.
pub fn matches(item: &Item, criteria: &FilterCriteria) -> bool {
    let attrs = item.attributes();

    if criteria.only_dolby_vision && !attrs.has_dolby_vision {
        return false;
    }
    if criteria.only_hdr && !attrs.has_hdr {
        return false;
    }
    if !criteria.resolution.is_empty() && attrs.resolution != criteria.resolution {
        return false;
    }
    if criteria.category.is_some_and(|c| c != attrs.category) {
        return false;
    }
    if attrs.rating < criteria.min_rating {
        return false;
    }
    if let Some(size) = attrs.size_gb {
        if size < criteria.min_size_gb || size > criteria.max_size_gb {
            return false;
        }
    }
    if !criteria.group.is_empty() && attrs.release_group.to_lowercase() != criteria.group {
        return false;
    }
    if !criteria.search.is_empty() && !item.text().to_lowercase().contains(&criteria.search) {
        return false;
    }
    true
}

/// Text of the results counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCounter {
    Showing { visible: usize, total: usize },
    /// Nothing visible out of a non-empty listing because filters are active
    NoResults { total: usize },
}

impl ResultCounter {
    fn new(visible: usize, total: usize, filters_active: bool) -> Self {
        if visible == 0 && total > 0 && filters_active {
            ResultCounter::NoResults { total }
        } else {
            ResultCounter::Showing { visible, total }
        }
    }
}

impl fmt::Display for ResultCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCounter::Showing { visible, total } => {
                write!(f, "Showing {visible} / {total} releases")
            }
            ResultCounter::NoResults { .. } => f.write_str("No results - try adjusting your filters"),
        }
    }
}

/// What one evaluation produced
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub criteria: FilterCriteria,
    pub visible: usize,
    pub total: usize,
    pub counter: ResultCounter,
    /// Present when the group facet was rebuilt
    pub facets: Option<FacetIndex>,
}

/// Evaluate every card against the bar's current values.
///
/// Pass one applies everything but the group filter and feeds the group
/// facet. The facet is only rebuilt while no group is selected, so an active
/// selection never drops out of its own option list. Pass two applies the
/// group filter to the cards left visible by pass one.
pub fn evaluate(listing: &mut Listing, bar: &mut ControlBar) -> FilterOutcome {
    let criteria = FilterCriteria::from_controls(bar);
    let ungrouped = criteria.without_group();

    for item in listing.items_mut() {
        let visible = matches(item, &ungrouped);
        item.set_visible(visible);
    }

    let facets = criteria
        .group
        .is_empty()
        .then(|| rebuild_group_selector(listing, bar));

    let mut visible = 0;
    for item in listing.items_mut().iter_mut().filter(|i| i.is_visible()) {
        if !criteria.group.is_empty()
            && item.attributes().release_group.to_lowercase() != criteria.group
        {
            item.set_visible(false);
        } else {
            visible += 1;
        }
    }

    let total = listing.len();
    let counter = ResultCounter::new(visible, total, criteria.is_active());
    bar.refresh_highlights();

    tracing::debug!(visible, total, "applied filters");

    FilterOutcome {
        criteria,
        visible,
        total,
        counter,
        facets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls;
    use crate::extractors::Category;

    fn card(title: &str, extra: &str) -> Item {
        Item::new(format!(r#"<div class="fit item"><h5>{title}</h5>{extra}</div>"#))
    }

    fn scenario_item() -> Item {
        card("Movie Title – 4.2 GB – GROUPX", "<p>Rating: 7.5/10</p>")
    }

    #[test]
    fn test_default_criteria_match_everything() {
        let criteria = FilterCriteria::default();
        let items = [
            scenario_item(),
            card("", ""),
            Item::new("<p>not even a card</p>"),
            card("Big.Movie-GRP – 80 GB", r#"<span class="buttonhdr"></span>"#),
        ];
        assert!(items.iter().all(|i| matches(i, &criteria)));
    }

    #[test]
    fn test_min_rating_excludes_lower() {
        let criteria = FilterCriteria {
            min_rating: 8.0,
            ..Default::default()
        };
        assert!(!matches(&scenario_item(), &criteria));

        let criteria = FilterCriteria {
            min_rating: 7.5,
            ..Default::default()
        };
        assert!(matches(&scenario_item(), &criteria));
    }

    #[test]
    fn test_missing_size_ignores_size_bounds() {
        let sizeless = card("Some.Movie-GRP", "");
        let criteria = FilterCriteria {
            min_size_gb: 10.0,
            max_size_gb: 20.0,
            ..Default::default()
        };
        assert!(matches(&sizeless, &criteria));
        assert!(!matches(&card("Some.Movie-GRP – 5 GB", ""), &criteria));
        assert!(!matches(&card("Some.Movie-GRP – 25 GB", ""), &criteria));
        assert!(matches(&card("Some.Movie-GRP – 15 GB", ""), &criteria));
    }

    #[test]
    fn test_flags_resolution_category() {
        let item = card(
            "Show-GRP – 3 GB",
            r#"<span class="calidad3">1080p</span><div class="calidad4"><a href="/tv-packs/">P</a></div>"#,
        );

        let only_hdr = FilterCriteria {
            only_hdr: true,
            ..Default::default()
        };
        assert!(!matches(&item, &only_hdr));

        let only_dv = FilterCriteria {
            only_dolby_vision: true,
            ..Default::default()
        };
        assert!(!matches(&item, &only_dv));

        let res = FilterCriteria {
            resolution: "1080p".into(),
            category: Some(Category::TvPacks),
            ..Default::default()
        };
        assert!(matches(&item, &res));

        let wrong = FilterCriteria {
            category: Some(Category::Movies),
            ..Default::default()
        };
        assert!(!matches(&item, &wrong));
    }

    #[test]
    fn test_group_and_search_case_insensitive() {
        let item = card("Dune.Part.Two.2160p-FraMeSToR – 60 GB", "");
        let criteria = FilterCriteria {
            group: "framestor".into(),
            search: "part.two".into(),
            ..Default::default()
        };
        assert!(matches(&item, &criteria));

        let other = FilterCriteria {
            group: "ntb".into(),
            ..Default::default()
        };
        assert!(!matches(&item, &other));
    }

    fn listing() -> Listing {
        Listing::new(vec![
            card("A.Movie-AAA – 2 GB", "<p>Rating: 8.1/10</p>"),
            card("B.Movie-BBB – 4 GB", "<p>Rating: 5.0/10</p>"),
            card("C.Movie-aaa – 6 GB", "<p>Rating: 9.0/10</p>"),
        ])
    }

    #[test]
    fn test_evaluate_without_filters() {
        let mut listing = listing();
        let mut bar = ControlBar::new();

        let outcome = evaluate(&mut listing, &mut bar);
        assert_eq!(outcome.visible, 3);
        assert_eq!(outcome.counter.to_string(), "Showing 3 / 3 releases");
        assert_eq!(outcome.facets.map(|f| f.len()), Some(2));
        assert_eq!(bar.get(controls::GROUP).unwrap().options().len(), 3);
    }

    #[test]
    fn test_evaluate_scenario_no_results() {
        let mut listing = Listing::new(vec![scenario_item()]);
        let mut bar = ControlBar::new();
        bar.set_value(controls::MIN_RATING, "8.0");

        let outcome = evaluate(&mut listing, &mut bar);
        assert_eq!(outcome.visible, 0);
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.counter, ResultCounter::NoResults { total: 1 });
        assert_eq!(outcome.counter.to_string(), "No results - try adjusting your filters");
        assert_eq!(bar.active_ids(), vec![controls::MIN_RATING]);
    }

    #[test]
    fn test_empty_listing_is_not_no_results() {
        let mut listing = Listing::default();
        let mut bar = ControlBar::new();
        bar.set_checked(controls::HDR, true);

        let outcome = evaluate(&mut listing, &mut bar);
        assert_eq!(outcome.counter, ResultCounter::Showing { visible: 0, total: 0 });
    }

    #[test]
    fn test_group_selection_suppresses_facet_rebuild() {
        let mut listing = listing();
        let mut bar = ControlBar::new();
        evaluate(&mut listing, &mut bar);
        bar.set_value(controls::GROUP, "bbb");

        // BBB fails the rating bound, yet stays selectable
        bar.set_value(controls::MIN_RATING, "8");
        let outcome = evaluate(&mut listing, &mut bar);

        assert!(outcome.facets.is_none());
        assert_eq!(outcome.visible, 0);
        assert_eq!(bar.value(controls::GROUP), "bbb");
        assert!(bar
            .get(controls::GROUP)
            .unwrap()
            .options()
            .iter()
            .any(|o| o.value == "bbb"));
    }

    #[test]
    fn test_group_applied_over_first_pass() {
        let mut listing = listing();
        let mut bar = ControlBar::new();
        evaluate(&mut listing, &mut bar);
        bar.set_value(controls::GROUP, "aaa");

        let outcome = evaluate(&mut listing, &mut bar);
        assert_eq!(outcome.visible, 2);
        let visible: Vec<bool> = listing.items().iter().map(Item::is_visible).collect();
        assert_eq!(visible, vec![true, false, true]);
    }

    #[test]
    fn test_facet_reflects_other_filters() {
        let mut listing = listing();
        let mut bar = ControlBar::new();
        bar.set_value(controls::MAX_SIZE, "3");

        let outcome = evaluate(&mut listing, &mut bar);
        let facets = outcome.facets.unwrap();
        assert_eq!(facets.len(), 1);
        assert!(facets.contains("aaa"));
    }
}
