//! Filter evaluator: derives the visible subset of the store from the
//! compound filter state.
//!
//! Each active facet contributes one predicate and a listing is visible only
//! when every predicate holds. Facet keys that the active category does not
//! declare are skipped, as are empty or malformed selections; evaluation never
//! fails.

use localmarket_types::{Category, FEATURES_KEY, FilterState, FilterValue, Listing, START_TIME_KEY};
use localmarket_util::{parse_minutes, range_upper_bound};

use crate::catalog;

/// The match rule applied for a facet key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `listing.price <= selection`
    PriceCeiling,
    /// `listing.startTime <= selection`, both as minutes since midnight
    TimeCeiling,
    /// upper bound of `listing.groupSize <= selection`
    GroupSizeCeiling,
    /// listing features contain every selected feature
    FeaturesSuperset,
    /// listing location contains the selection, case-insensitive
    LocationContains,
    /// listing attribute equals the selection exactly
    Exact,
}

impl MatchRule {
    pub fn for_key(key: &str) -> Self {
        match key {
            "price" => Self::PriceCeiling,
            START_TIME_KEY => Self::TimeCeiling,
            "groupSize" => Self::GroupSizeCeiling,
            FEATURES_KEY => Self::FeaturesSuperset,
            "location" => Self::LocationContains,
            _ => Self::Exact,
        }
    }
}

/// Tests one listing against one facet selection.
///
/// Empty selections and selections that cannot be read for the facet's rule
/// (non-numeric price text, unparseable times) always pass.
pub fn matches_facet(listing: &Listing, key: &str, value: &FilterValue) -> bool {
    if value.is_empty() {
        return true;
    }
    match MatchRule::for_key(key) {
        MatchRule::PriceCeiling => match value.as_number() {
            Some(ceiling) => listing.price <= ceiling,
            None => true,
        },
        MatchRule::TimeCeiling => {
            let Some(ceiling) = selected_minutes(value) else {
                return true;
            };
            parse_minutes(&listing.start_time).is_some_and(|minutes| minutes <= ceiling)
        }
        MatchRule::GroupSizeCeiling => {
            let Some(ceiling) = value.as_number() else {
                return true;
            };
            range_upper_bound(&listing.group_size).is_some_and(|upper| upper <= ceiling)
        }
        MatchRule::FeaturesSuperset => match value {
            FilterValue::Set(selected) => selected.iter().all(|feature| listing.features.contains(feature)),
            FilterValue::Text(feature) => listing.features.contains(feature.as_str()),
            FilterValue::Number(_) => true,
        },
        MatchRule::LocationContains => {
            let Some(needle) = value.as_text() else {
                return true;
            };
            let needle = needle.trim().to_lowercase();
            listing
                .location
                .as_deref()
                .is_some_and(|location| location.to_lowercase().contains(&needle))
        }
        MatchRule::Exact => match value {
            FilterValue::Text(expected) => listing.attribute(key).is_some_and(|actual| actual == expected.as_str()),
            FilterValue::Number(expected) => listing
                .attribute(key)
                .and_then(|actual| actual.trim().parse::<f64>().ok())
                .is_some_and(|actual| actual == *expected),
            FilterValue::Set(_) => true,
        },
    }
}

fn selected_minutes(value: &FilterValue) -> Option<u32> {
    match value {
        FilterValue::Text(text) => parse_minutes(text),
        FilterValue::Number(minutes) if minutes.is_finite() && *minutes >= 0.0 => Some(*minutes as u32),
        _ => None,
    }
}

/// Returns `true` when `listing` satisfies every facet of `filters` that the
/// category declares.
pub fn matches_all(listing: &Listing, category: Category, filters: &FilterState) -> bool {
    filters
        .active()
        .filter(|(key, _)| catalog::has_facet(category, key))
        .all(|(key, value)| matches_facet(listing, key, value))
}

/// Indices of the listings visible under `filters`, in store order.
pub fn evaluate(store: &[Listing], category: Category, filters: &FilterState) -> Vec<usize> {
    store
        .iter()
        .enumerate()
        .filter(|(_, listing)| matches_all(listing, category, filters))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_listings;

    fn types_of(store: &[Listing], visible: &[usize]) -> Vec<String> {
        visible.iter().map(|&idx| store[idx].r#type.clone()).collect()
    }

    fn single(key: &str, value: FilterValue) -> FilterState {
        [(key, value)].into_iter().collect()
    }

    #[test]
    fn no_active_facets_keeps_everything() {
        let store = seed_listings();
        assert_eq!(evaluate(&store, Category::Tours, &FilterState::new()), vec![0, 1, 2]);

        let empties: FilterState = [
            ("theme", FilterValue::text("")),
            ("features", FilterValue::set(Vec::<String>::new())),
            ("location", FilterValue::text("  ")),
        ]
        .into_iter()
        .collect();
        assert_eq!(evaluate(&store, Category::Tours, &empties), vec![0, 1, 2]);
    }

    #[test]
    fn price_ceiling_keeps_cheaper_listings() {
        let store = seed_listings();
        let visible = evaluate(&store, Category::Tours, &single("price", FilterValue::Number(130.0)));
        assert_eq!(types_of(&store, &visible), vec!["Land Tour"]);

        let visible = evaluate(&store, Category::Tours, &single("price", FilterValue::text("150")));
        assert_eq!(types_of(&store, &visible), vec!["Island Tour", "Land Tour"]);
    }

    #[test]
    fn price_is_monotonic() {
        let store = seed_listings();
        let mut previous = usize::MAX;
        for ceiling in [1000.0, 500.0, 499.0, 150.0, 130.0, 120.0, 119.0, 0.0] {
            let visible = evaluate(&store, Category::Tours, &single("price", FilterValue::Number(ceiling)));
            for &idx in &visible {
                assert!(store[idx].price <= ceiling);
            }
            assert!(visible.len() <= previous);
            previous = visible.len();
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn price_and_feature_compound() {
        let store = seed_listings();
        let filters: FilterState = [
            ("price", FilterValue::Number(130.0)),
            ("features", FilterValue::set(["Historical Sites"])),
        ]
        .into_iter()
        .collect();
        let visible = evaluate(&store, Category::Tours, &filters);
        assert_eq!(types_of(&store, &visible), vec!["Land Tour"]);
    }

    #[test]
    fn features_require_every_selection() {
        let store = seed_listings();
        let visible = evaluate(&store, Category::Tours, &single("features", FilterValue::set(["Open Bar"])));
        assert_eq!(types_of(&store, &visible), vec!["Yacht"]);

        let visible = evaluate(
            &store,
            Category::Tours,
            &single("features", FilterValue::set(["Open Bar", "Guided Tour"])),
        );
        assert!(visible.is_empty());
    }

    #[test]
    fn start_time_compares_on_minutes() {
        let store = seed_listings();
        let visible = evaluate(&store, Category::Tours, &single("startTime", FilterValue::text("09:30")));
        assert_eq!(types_of(&store, &visible), vec!["Island Tour"]);

        let visible = evaluate(&store, Category::Tours, &single("startTime", FilterValue::text("13:00")));
        assert_eq!(types_of(&store, &visible), vec!["Island Tour", "Land Tour", "Yacht"]);

        let visible = evaluate(&store, Category::Tours, &single("startTime", FilterValue::text("12:59")));
        assert_eq!(types_of(&store, &visible), vec!["Island Tour", "Land Tour"]);
    }

    #[test]
    fn group_size_uses_upper_bound() {
        let store = seed_listings();
        for ceiling in [10.0, 15.0, 20.0, 40.0] {
            let visible = evaluate(&store, Category::Tours, &single("groupSize", FilterValue::Number(ceiling)));
            for (idx, listing) in store.iter().enumerate() {
                let upper = range_upper_bound(&listing.group_size).expect("seed ranges parse");
                assert_eq!(visible.contains(&idx), upper <= ceiling, "ceiling {ceiling} listing {}", listing.id);
            }
        }
        let visible = evaluate(&store, Category::Tours, &single("groupSize", FilterValue::Number(15.0)));
        assert_eq!(types_of(&store, &visible), vec!["Land Tour"]);
    }

    #[test]
    fn location_is_case_insensitive_substring() {
        let mut store = seed_listings();
        store[0].location = Some("Phi Phi Island".into());
        let visible = evaluate(&store, Category::Tours, &single("location", FilterValue::text("phi phi")));
        assert_eq!(types_of(&store, &visible), vec!["Island Tour"]);
    }

    #[test]
    fn location_filter_drops_listings_without_location() {
        let store = seed_listings();
        let visible = evaluate(&store, Category::Tours, &single("location", FilterValue::text("phi")));
        assert!(visible.is_empty());
        let visible = evaluate(&store, Category::Tours, &single("location", FilterValue::text("")));
        assert_eq!(visible.len(), store.len());
    }

    #[test]
    fn other_keys_match_exactly() {
        let store = seed_listings();
        let visible = evaluate(&store, Category::Tours, &single("theme", FilterValue::text("Cultural")));
        assert_eq!(types_of(&store, &visible), vec!["Land Tour"]);

        let visible = evaluate(&store, Category::Tours, &single("theme", FilterValue::text("cultural")));
        assert!(visible.is_empty());

        let visible = evaluate(&store, Category::Tickets, &single("seating", FilterValue::text("VIP")));
        assert!(visible.is_empty(), "listings without the attribute never match");
    }

    #[test]
    fn malformed_selections_are_unconstrained() {
        let store = seed_listings();
        let filters: FilterState = [
            ("price", FilterValue::text("cheap")),
            ("groupSize", FilterValue::text("lots")),
            ("startTime", FilterValue::text("whenever")),
        ]
        .into_iter()
        .collect();
        assert_eq!(evaluate(&store, Category::Tours, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn keys_outside_category_are_ignored() {
        let store = seed_listings();
        let filters = single("groupSize", FilterValue::Number(15.0));
        assert_eq!(evaluate(&store, Category::Tours, &filters).len(), 1);
        assert_eq!(evaluate(&store, Category::Tickets, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn day_part_start_times_do_not_constrain() {
        let store = seed_listings();
        let filters = single("startTime", FilterValue::text("Morning"));
        assert_eq!(evaluate(&store, Category::Tickets, &filters), vec![0, 1, 2]);
    }
}
