use localmarket_engine::catalog;
use localmarket_types::{Category, Facet, FacetDescriptor, FilterState, FilterValue, format_price};
use localmarket_util::facet_title;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use crate::ui::components::common::TextInputState;

/// Rendering and editing state for one facet group.
#[derive(Debug, Clone)]
pub struct FacetControl {
    pub facet: &'static Facet,
    pub focus: FocusFlag,
    /// Highlighted option of a choice group.
    pub cursor: usize,
    /// Text buffer of numeric, time and free-text groups.
    pub input: TextInputState,
}

impl FacetControl {
    fn new(facet: &'static Facet) -> Self {
        Self {
            facet,
            focus: FocusFlag::named(&format!("panel.facet.{}", facet.key)),
            cursor: 0,
            input: TextInputState::new(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.facet.key
    }

    pub fn title(&self) -> String {
        facet_title(self.facet.key)
    }

    pub fn has_input(&self) -> bool {
        !matches!(self.facet.descriptor, FacetDescriptor::Choice { .. })
    }

    /// Mirrors the stored selection into the text buffer.
    fn sync_input(&mut self, value: Option<&FilterValue>) {
        if !self.has_input() {
            return;
        }
        let text = match value {
            Some(FilterValue::Number(n)) if n.is_finite() => format_price(*n),
            Some(FilterValue::Text(text)) => text.clone(),
            _ => String::new(),
        };
        self.input.set_input(text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    Reset,
    Search,
}

impl PanelButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reset => "RESET",
            Self::Search => "SEARCH",
        }
    }
}

/// What a mouse click inside the panel landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelHit {
    Control(usize),
    Option { control: usize, option: usize },
    Button(PanelButton),
}

/// State of the filter panel: one control per facet of the active category
/// plus the RESET and SEARCH buttons.
///
/// Controls are rebuilt whenever the category changes; text buffers are
/// re-synced from the filter state after every transition so RESET and
/// slider steps are reflected in the inputs.
#[derive(Debug, Clone)]
pub struct FilterPanelState {
    pub category: Category,
    pub controls: Vec<FacetControl>,
    pub f_reset: FocusFlag,
    pub f_search: FocusFlag,
    pub container_focus: FocusFlag,
    /// Index of the first control drawn.
    pub scroll: usize,
    /// Focused control `scroll` was last aligned to; wheel scrolling moves
    /// `scroll` freely until focus changes again.
    scroll_focus: Option<usize>,
    pub last_area: Rect,
    pub hit_areas: Vec<(Rect, PanelHit)>,
}

impl Default for FilterPanelState {
    fn default() -> Self {
        Self::new(Category::default(), &FilterState::new())
    }
}

impl FilterPanelState {
    pub fn new(category: Category, filters: &FilterState) -> Self {
        let mut state = Self {
            category,
            controls: Vec::new(),
            f_reset: FocusFlag::named("panel.reset"),
            f_search: FocusFlag::named("panel.search"),
            container_focus: FocusFlag::named("panel"),
            scroll: 0,
            scroll_focus: None,
            last_area: Rect::default(),
            hit_areas: Vec::new(),
        };
        state.rebuild_controls();
        state.sync_inputs(filters);
        state
    }

    fn rebuild_controls(&mut self) {
        self.controls = catalog::facets(self.category).iter().map(FacetControl::new).collect();
        self.scroll = 0;
        self.scroll_focus = None;
    }

    /// Brings the panel in line with the controller state.
    pub fn sync(&mut self, category: Category, filters: &FilterState) {
        if category != self.category {
            self.category = category;
            self.rebuild_controls();
        }
        self.sync_inputs(filters);
    }

    pub fn sync_inputs(&mut self, filters: &FilterState) {
        for control in &mut self.controls {
            control.sync_input(filters.get(control.key()));
        }
    }

    pub fn focused_control(&self) -> Option<usize> {
        self.controls.iter().position(|control| control.focus.get())
    }

    pub fn focused_button(&self) -> Option<PanelButton> {
        if self.f_reset.get() {
            Some(PanelButton::Reset)
        } else if self.f_search.get() {
            Some(PanelButton::Search)
        } else {
            None
        }
    }

    pub fn button_flag(&self, button: PanelButton) -> &FocusFlag {
        match button {
            PanelButton::Reset => &self.f_reset,
            PanelButton::Search => &self.f_search,
        }
    }

    /// Focus order: every control, then RESET, then SEARCH.
    pub fn focus_flags(&self) -> Vec<FocusFlag> {
        self.controls
            .iter()
            .map(|control| control.focus.clone())
            .chain([self.f_reset.clone(), self.f_search.clone()])
            .collect()
    }

    pub fn first_flag(&self) -> Option<FocusFlag> {
        self.focus_flags().into_iter().next()
    }

    /// Returns the flag next to the focused one, wrapping at both ends.
    pub fn cycle_focus(&self, forward: bool) -> Option<FocusFlag> {
        let flags = self.focus_flags();
        let len = flags.len();
        let Some(idx) = flags.iter().position(FocusFlag::get) else {
            return flags.into_iter().next();
        };
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        flags.get(next).cloned()
    }

    /// Adjusts `scroll` so the focused control fits into `available` rows,
    /// given the rendered height of every control. Only a focus change
    /// triggers the adjustment.
    pub fn ensure_visible(&mut self, heights: &[u16], available: u16) {
        self.scroll = self.scroll.min(heights.len().saturating_sub(1));
        let focused = self.focused_control();
        if focused == self.scroll_focus {
            return;
        }
        self.scroll_focus = focused;
        let Some(focused) = focused else {
            return;
        };
        if focused < self.scroll {
            self.scroll = focused;
            return;
        }
        while self.scroll < focused && heights[self.scroll..=focused].iter().map(|h| u32::from(*h)).sum::<u32>() > u32::from(available) {
            self.scroll += 1;
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<PanelHit> {
        self.hit_areas
            .iter()
            .rev()
            .find(|(area, _)| area.contains((x, y).into()))
            .map(|(_, hit)| *hit)
    }
}

impl HasFocus for FilterPanelState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        for control in &self.controls {
            builder.leaf_widget(&control.focus);
        }
        builder.leaf_widget(&self.f_reset);
        builder.leaf_widget(&self.f_search);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_follow_facet_table_order() {
        let state = FilterPanelState::new(Category::Tours, &FilterState::new());
        let keys: Vec<&str> = state.controls.iter().map(FacetControl::key).collect();
        assert_eq!(
            keys,
            vec!["location", "theme", "activity", "price", "startTime", "groupSize", "vehicle", "features"]
        );
        assert_eq!(state.controls[4].title(), "Start Time");
    }

    #[test]
    fn category_change_rebuilds_controls() {
        let mut state = FilterPanelState::new(Category::Tours, &FilterState::new());
        state.scroll = 3;
        let filters: FilterState = [("price", FilterValue::Number(130.0))].into_iter().collect();
        state.sync(Category::Tickets, &filters);
        assert_eq!(state.controls.len(), 6);
        assert_eq!(state.controls[0].key(), "theme");
        assert_eq!(state.scroll, 0);
        assert_eq!(state.controls[2].input.input(), "130", "carried price shows in the input");
    }

    #[test]
    fn inputs_mirror_filter_values() {
        let mut state = FilterPanelState::new(Category::Tours, &FilterState::new());
        let filters: FilterState = [
            ("location", FilterValue::text("phi")),
            ("startTime", FilterValue::text("09:30")),
            ("groupSize", FilterValue::Number(15.0)),
        ]
        .into_iter()
        .collect();
        state.sync_inputs(&filters);
        assert_eq!(state.controls[0].input.input(), "phi");
        assert_eq!(state.controls[4].input.input(), "09:30");
        assert_eq!(state.controls[5].input.input(), "15");

        state.sync_inputs(&FilterState::new());
        assert!(state.controls.iter().all(|c| c.input.input().is_empty()));
    }

    #[test]
    fn cycle_focus_covers_controls_and_buttons() {
        let state = FilterPanelState::new(Category::Transfer, &FilterState::new());
        let first = state.cycle_focus(true).expect("first");
        assert_eq!(first.widget_id(), state.controls[0].focus.widget_id());

        state.f_search.set(true);
        let wrapped = state.cycle_focus(true).expect("wrap");
        assert_eq!(wrapped.widget_id(), state.controls[0].focus.widget_id());
        let back = state.cycle_focus(false).expect("back");
        assert_eq!(back.widget_id(), state.f_reset.widget_id());
        assert_eq!(state.focused_button(), Some(PanelButton::Search));
    }

    #[test]
    fn ensure_visible_scrolls_to_focused_control() {
        let mut state = FilterPanelState::new(Category::Tours, &FilterState::new());
        let heights = [3, 3, 4, 4, 4, 4, 5, 3];
        state.controls[6].focus.set(true);
        state.ensure_visible(&heights, 12);
        assert_eq!(state.scroll, 5);

        state.controls[6].focus.set(false);
        state.controls[1].focus.set(true);
        state.ensure_visible(&heights, 12);
        assert_eq!(state.scroll, 1);
    }

    #[test]
    fn wheel_scroll_survives_until_focus_moves() {
        let mut state = FilterPanelState::new(Category::Tours, &FilterState::new());
        let heights = [3, 3, 4, 4, 4, 4, 5, 3];
        state.controls[0].focus.set(true);
        state.ensure_visible(&heights, 12);
        assert_eq!(state.scroll, 0);

        state.scroll = 4;
        state.ensure_visible(&heights, 12);
        assert_eq!(state.scroll, 4, "unchanged focus keeps the wheel position");

        state.controls[0].focus.set(false);
        state.controls[2].focus.set(true);
        state.ensure_visible(&heights, 12);
        assert_eq!(state.scroll, 2);
    }
}
