//! Top navigation bar.
//!
//! A horizontal strip with the application title, one tab per category and a
//! "Filter" trigger that opens the slide-over filter panel. Each item carries
//! its own rat-focus `FocusFlag` so Left/Right can walk the bar while Tab
//! moves on to the results grid.

mod nav_bar_component;
mod state;

pub use nav_bar_component::NavBarComponent;
pub use state::{NavBarState, NavItem};

/// Title rendered at the left edge of the bar.
pub const APP_TITLE: &str = "Traveller's Local Market";
