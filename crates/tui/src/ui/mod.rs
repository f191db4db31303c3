//! UI layer: components, theming, the main view and the runtime loop.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
