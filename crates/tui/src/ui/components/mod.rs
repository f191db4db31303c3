//! UI components: navigation bar, filter panel, results grid.

pub mod common;
pub mod component;
pub mod filter_panel;
pub mod nav_bar;
pub mod results;

pub use component::*;
pub use filter_panel::{FilterPanelComponent, FilterPanelState};
pub use nav_bar::{NavBarComponent, NavBarState};
pub use results::{ResultsComponent, ResultsState};
