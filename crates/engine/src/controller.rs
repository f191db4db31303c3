//! Filter state controller.
//!
//! [`MarketState`] is immutable per transition: [`reduce`] takes the prior
//! state and a [`FilterAction`] and returns the next state, re-deriving the
//! visible subset whenever the selections or the category change. The TUI
//! stores the result; tests drive it without any rendering surface.

use std::sync::Arc;

use localmarket_types::{Category, FEATURES_KEY, Facet, FilterAction, FilterState, FilterValue, Listing, PanelState, START_TIME_KEY};
use localmarket_util::format_minutes;
use tracing::debug;

use crate::{catalog, counts, evaluator, store};

/// Complete filter UI state: active category, selections, panel state and
/// the derived visible subset.
#[derive(Debug, Clone)]
pub struct MarketState {
    store: Arc<[Listing]>,
    category: Category,
    filters: FilterState,
    panel: PanelState,
    visible: Vec<usize>,
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new(store::seed_store(), Category::default())
    }
}

impl MarketState {
    /// Creates a state over `store` with no selections and a closed panel.
    pub fn new(store: Arc<[Listing]>, category: Category) -> Self {
        let visible = (0..store.len()).collect();
        Self {
            store,
            category,
            filters: FilterState::new(),
            panel: PanelState::Closed,
            visible,
        }
    }

    /// Creates a state with pre-populated selections, e.g. from command-line flags.
    pub fn with_filters(store: Arc<[Listing]>, category: Category, filters: FilterState) -> Self {
        let mut state = Self::new(store, category);
        state.filters = filters;
        state.refresh_visible();
        state
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    pub fn store(&self) -> &[Listing] {
        &self.store
    }

    /// Facet table of the active category.
    pub fn facets(&self) -> &'static [Facet] {
        catalog::facets(self.category)
    }

    /// Indices of visible listings in store order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The visible subset, in store order.
    pub fn visible(&self) -> impl Iterator<Item = &Listing> {
        self.visible.iter().filter_map(|&idx| self.store.get(idx))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Available counts for a facet of the active category.
    pub fn facet_counts(&self, facet: &Facet) -> Vec<(&'static str, usize)> {
        counts::facet_counts(&self.store, self.category, &self.filters, facet)
    }

    /// Applies `action` and returns the resulting state, leaving `self` untouched.
    pub fn apply(&self, action: &FilterAction) -> MarketState {
        let mut next = self.clone();
        next.apply_in_place(action);
        next
    }

    fn apply_in_place(&mut self, action: &FilterAction) {
        match action {
            FilterAction::SetFacetValue { key, value } => self.set_facet_value(key, value.clone()),
            FilterAction::ClearFacet(key) => {
                self.filters.remove(key);
                self.refresh_visible();
            }
            FilterAction::ToggleFeature(feature) => self.toggle_feature(feature),
            FilterAction::SetTimeFromMinutes(minutes) => {
                self.set_facet_value(START_TIME_KEY, FilterValue::Text(format_minutes(*minutes)));
            }
            FilterAction::Reset => {
                self.filters.clear();
                self.visible = (0..self.store.len()).collect();
            }
            FilterAction::SelectCategory(category) => {
                self.category = *category;
                self.refresh_visible();
            }
            FilterAction::OpenPanel => self.panel = PanelState::Open,
            FilterAction::ClosePanel => self.panel = PanelState::Closed,
        }
        debug!(
            ?action,
            category = %self.category,
            active_facets = self.filters.len(),
            visible = self.visible.len(),
            "filter state transition"
        );
    }

    fn set_facet_value(&mut self, key: &str, value: FilterValue) {
        self.filters.set(key, value);
        self.refresh_visible();
    }

    fn toggle_feature(&mut self, feature: &str) {
        let mut features = self.filters.features();
        if !features.shift_remove(feature) {
            features.insert(feature.to_string());
        }
        if features.is_empty() {
            self.filters.remove(FEATURES_KEY);
        } else {
            self.filters.set(FEATURES_KEY, FilterValue::Set(features));
        }
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = evaluator::evaluate(&self.store, self.category, &self.filters);
    }
}

/// Reducer entry point: `(prior state, action) -> next state`.
pub fn reduce(state: &MarketState, action: &FilterAction) -> MarketState {
    state.apply(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_types(state: &MarketState) -> Vec<&str> {
        state.visible().map(|l| l.r#type.as_str()).collect()
    }

    fn set(key: &str, value: FilterValue) -> FilterAction {
        FilterAction::SetFacetValue { key: key.to_string(), value }
    }

    #[test]
    fn starts_closed_with_everything_visible() {
        let state = MarketState::default();
        assert_eq!(state.panel(), PanelState::Closed);
        assert_eq!(state.category(), Category::Tours);
        assert_eq!(visible_types(&state), vec!["Island Tour", "Land Tour", "Yacht"]);
    }

    #[test]
    fn reduce_leaves_prior_state_untouched() {
        let prior = MarketState::default();
        let next = reduce(&prior, &set("price", FilterValue::Number(130.0)));
        assert_eq!(prior.visible_len(), 3);
        assert!(prior.filters().is_empty());
        assert_eq!(visible_types(&next), vec!["Land Tour"]);
    }

    #[test]
    fn set_facet_value_replaces_previous_selection() {
        let state = MarketState::default()
            .apply(&set("theme", FilterValue::text("Adventure")))
            .apply(&set("theme", FilterValue::text("Luxury")));
        assert_eq!(state.filters().len(), 1);
        assert_eq!(visible_types(&state), vec!["Yacht"]);
    }

    #[test]
    fn toggle_feature_twice_restores_prior_state() {
        let base = MarketState::default().apply(&FilterAction::ToggleFeature("Open Bar".into()));
        let toggled = base
            .apply(&FilterAction::ToggleFeature("Music System".into()))
            .apply(&FilterAction::ToggleFeature("Music System".into()));
        assert_eq!(toggled.filters(), base.filters());
        assert_eq!(toggled.visible_indices(), base.visible_indices());

        let cleared = base.apply(&FilterAction::ToggleFeature("Open Bar".into()));
        assert!(cleared.filters().get(FEATURES_KEY).is_none());
        assert_eq!(cleared.visible_len(), 3);
    }

    #[test]
    fn toggle_feature_respects_other_active_facets() {
        let state = MarketState::default()
            .apply(&set("price", FilterValue::Number(130.0)))
            .apply(&FilterAction::ToggleFeature("Open Bar".into()));
        assert!(state.visible().next().is_none(), "compound AND with price excludes the yacht");

        let state = MarketState::default()
            .apply(&set("price", FilterValue::Number(130.0)))
            .apply(&FilterAction::ToggleFeature("Historical Sites".into()));
        assert_eq!(visible_types(&state), vec!["Land Tour"]);
    }

    #[test]
    fn open_bar_feature_yields_only_the_yacht() {
        let state = MarketState::default().apply(&FilterAction::ToggleFeature("Open Bar".into()));
        assert_eq!(visible_types(&state), vec!["Yacht"]);
    }

    #[test]
    fn set_time_from_minutes_formats_and_filters() {
        let state = MarketState::default().apply(&FilterAction::SetTimeFromMinutes(570));
        assert_eq!(state.filters().get(START_TIME_KEY), Some(&FilterValue::text("09:30")));
        assert_eq!(visible_types(&state), vec!["Island Tour"]);

        let state = state.apply(&FilterAction::SetTimeFromMinutes(5_000));
        assert_eq!(state.filters().get(START_TIME_KEY), Some(&FilterValue::text("23:59")));
        assert_eq!(state.visible_len(), 3);
    }

    #[test]
    fn reset_always_restores_full_store() {
        let state = MarketState::default()
            .apply(&set("price", FilterValue::Number(10.0)))
            .apply(&FilterAction::ToggleFeature("Open Bar".into()))
            .apply(&FilterAction::SelectCategory(Category::Rent))
            .apply(&FilterAction::Reset);
        assert!(state.filters().is_empty());
        assert_eq!(state.visible_len(), state.store().len());
        assert_eq!(state.category(), Category::Rent);
    }

    #[test]
    fn category_switch_keeps_filters_and_ignores_foreign_keys() {
        let tours = MarketState::default().apply(&set("price", FilterValue::Number(130.0)));
        let tickets = tours.apply(&FilterAction::SelectCategory(Category::Tickets));
        assert_eq!(tickets.category(), Category::Tickets);
        assert_eq!(tickets.facets()[0].key, "theme");
        assert_eq!(tickets.filters().get("price"), Some(&FilterValue::Number(130.0)));
        assert_eq!(visible_types(&tickets), vec!["Land Tour"], "Tickets declares price, so it still applies");

        let grouped = MarketState::default().apply(&set("groupSize", FilterValue::Number(15.0)));
        assert_eq!(grouped.visible_len(), 1);
        let tickets = grouped.apply(&FilterAction::SelectCategory(Category::Tickets));
        assert_eq!(tickets.visible_len(), 3, "Tickets has no groupSize facet");
        let back = tickets.apply(&FilterAction::SelectCategory(Category::Tours));
        assert_eq!(back.visible_len(), 1, "the carried value applies again");
    }

    #[test]
    fn clear_facet_drops_one_key() {
        let state = MarketState::default()
            .apply(&set("price", FilterValue::Number(130.0)))
            .apply(&set("theme", FilterValue::text("Cultural")))
            .apply(&FilterAction::ClearFacet("price".into()));
        assert!(state.filters().get("price").is_none());
        assert_eq!(visible_types(&state), vec!["Land Tour"]);
    }

    #[test]
    fn panel_toggles_between_two_states() {
        let open = MarketState::default().apply(&FilterAction::OpenPanel);
        assert!(open.is_panel_open());
        let open_again = open.apply(&FilterAction::OpenPanel);
        assert!(open_again.is_panel_open());
        let closed = open_again.apply(&FilterAction::ClosePanel);
        assert_eq!(closed.panel(), PanelState::Closed);
    }

    #[test]
    fn with_filters_derives_visible_subset() {
        let filters: FilterState = [("features", FilterValue::set(["Open Bar"]))].into_iter().collect();
        let state = MarketState::with_filters(store::seed_store(), Category::Tours, filters);
        assert_eq!(visible_types(&state), vec!["Yacht"]);
    }
}
