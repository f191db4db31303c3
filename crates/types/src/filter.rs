//! Filter selections and the actions that transition them.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::market::Category;

/// Facet key of the multi-select features group.
pub const FEATURES_KEY: &str = "features";
/// Facet key of the time-of-day range.
pub const START_TIME_KEY: &str = "startTime";

/// A selected value for one facet. The shape follows the facet descriptor:
/// numeric ceilings, time or choice text, or the features set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    Set(IndexSet<String>),
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    /// Empty selections leave the facet unconstrained.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(n) => n.is_nan(),
            Self::Text(s) => s.trim().is_empty(),
            Self::Set(values) => values.is_empty(),
        }
    }

    /// Numeric reading of the value; `None` for anything that does not parse.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| n.is_finite()),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Set(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&IndexSet<String>> {
        match self {
            Self::Set(values) => Some(values),
            _ => None,
        }
    }
}

/// Selected values keyed by facet, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: IndexMap<String, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    /// Inserts or replaces the value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.values.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries whose value actually constrains the result.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.iter().filter(|(_, v)| !v.is_empty())
    }

    /// Currently selected features; empty when none are selected.
    pub fn features(&self) -> IndexSet<String> {
        self.get(FEATURES_KEY).and_then(FilterValue::as_set).cloned().unwrap_or_default()
    }

    /// Returns `true` when `value` is the current selection for a single-choice facet.
    pub fn is_selected(&self, key: &str, value: &str) -> bool {
        match self.get(key) {
            Some(FilterValue::Text(current)) => current == value,
            Some(FilterValue::Set(values)) => values.contains(value),
            _ => false,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, FilterValue)> for FilterState {
    fn from_iter<T: IntoIterator<Item = (K, FilterValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Open/closed state of the slide-over filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

/// Transitions accepted by the filter state controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Replace or insert the value for a single facet.
    SetFacetValue { key: String, value: FilterValue },
    /// Remove a single facet's selection.
    ClearFacet(String),
    /// Add the feature when absent, remove it when present.
    ToggleFeature(String),
    /// Set `startTime` from a minutes-since-midnight slider position.
    SetTimeFromMinutes(u32),
    /// Clear every selection.
    Reset,
    /// Switch the facet table used for rendering and evaluation.
    SelectCategory(Category),
    OpenPanel,
    ClosePanel,
}
