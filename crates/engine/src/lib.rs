//! # Local Market Engine
//!
//! The filtering core behind the Local Market UI: a static category
//! registry, the seeded listing store, a total filter evaluator and a
//! reducer-style controller that owns filter state transitions.
//!
//! ## Usage
//!
//! ```rust
//! use localmarket_engine::{MarketState, reduce};
//! use localmarket_types::{FilterAction, FilterValue};
//!
//! let state = MarketState::default();
//! let state = reduce(&state, &FilterAction::SetFacetValue {
//!     key: "price".into(),
//!     value: FilterValue::Number(130.0),
//! });
//! let names: Vec<&str> = state.visible().map(|l| l.r#type.as_str()).collect();
//! assert_eq!(names, vec!["Land Tour"]);
//! ```
//!
//! ## Architecture
//!
//! - **`catalog`**: category -> ordered facet descriptors
//! - **`store`**: the fixed listing records
//! - **`evaluator`**: per-facet match rules and the compound filter
//! - **`counts`**: available counts for choice options
//! - **`controller`**: `MarketState` and its transitions

pub mod catalog;
pub mod controller;
pub mod counts;
pub mod evaluator;
pub mod store;

pub use controller::{MarketState, reduce};
pub use evaluator::{MatchRule, evaluate, matches_facet};
pub use store::{seed_listings, seed_store};
