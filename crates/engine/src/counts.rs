//! Available counts shown next to every choice in the filter panel.
//!
//! A count answers "how many results would I see if I picked this?": the
//! option is applied on top of every other active facet. Single-choice facets
//! replace their current value with the option; the multi-select features
//! group adds the option to the current selection. Range and text facets have
//! no per-option count.

use localmarket_types::{Category, Facet, FacetDescriptor, FilterState, FilterValue, Listing};

use crate::evaluator::matches_all;

/// Number of listings that would be visible with `option` selected for `key`.
pub fn available_count(store: &[Listing], category: Category, filters: &FilterState, key: &str, option: &str) -> usize {
    let hypothetical = with_option(filters, key, option, is_multi(category, key));
    store.iter().filter(|listing| matches_all(listing, category, &hypothetical)).count()
}

/// Counts for every option of a choice facet, in option order. Empty for
/// non-choice facets.
pub fn facet_counts(store: &[Listing], category: Category, filters: &FilterState, facet: &Facet) -> Vec<(&'static str, usize)> {
    match &facet.descriptor {
        FacetDescriptor::Choice { options, .. } => options
            .iter()
            .map(|option| (*option, available_count(store, category, filters, facet.key, option)))
            .collect(),
        FacetDescriptor::NumericRange { .. } | FacetDescriptor::TimeRange { .. } | FacetDescriptor::FreeText { .. } => {
            Vec::new()
        }
    }
}

fn is_multi(category: Category, key: &str) -> bool {
    crate::catalog::facet(category, key).is_some_and(|facet| facet.descriptor.is_multi_select())
}

fn with_option(filters: &FilterState, key: &str, option: &str, multiple: bool) -> FilterState {
    let mut hypothetical = filters.clone();
    if multiple {
        let mut selected = match filters.get(key) {
            Some(FilterValue::Set(values)) => values.clone(),
            _ => Default::default(),
        };
        selected.insert(option.to_string());
        hypothetical.set(key, FilterValue::Set(selected));
    } else {
        hypothetical.set(key, FilterValue::text(option));
    }
    hypothetical
}
