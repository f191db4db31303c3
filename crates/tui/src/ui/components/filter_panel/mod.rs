//! Slide-over filter panel.
//!
//! Renders one control group per facet of the active category, in facet
//! table order: chip groups with available counts for choices, a slider plus
//! numeric input for numeric ranges, a slider plus time input for time ranges,
//! and a text input for free text. RESET clears every selection and SEARCH
//! closes the panel. Every edit is dispatched as a `FilterAction`, so the
//! results grid behind the panel updates live.

mod filter_panel_component;
mod state;

pub use filter_panel_component::{FilterPanelComponent, PANEL_WIDTH};
pub use state::{FacetControl, FilterPanelState, PanelButton, PanelHit};
