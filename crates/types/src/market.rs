//! Domain types for the market catalog: categories, facet descriptors and listings.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Listing categories. The set is closed; every category owns a fixed facet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Tours,
    Tickets,
    Rent,
    Transfer,
}

impl Category {
    /// All categories in navigation order.
    pub const ALL: [Category; 4] = [Category::Tours, Category::Tickets, Category::Rent, Category::Transfer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tours => "Tours",
            Self::Tickets => "Tickets",
            Self::Rent => "Rent",
            Self::Transfer => "Transfer",
        }
    }

    /// Returns the category that follows `self` in navigation order, wrapping around.
    pub fn next(&self) -> Category {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Returns the category that precedes `self` in navigation order, wrapping around.
    pub fn prev(&self) -> Category {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'; expected one of Tours, Tickets, Rent, Transfer")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(needle.to_string()))
    }
}

/// Shape and value domain of a single facet.
///
/// The panel renders one control kind per variant and the evaluator picks a
/// match rule per facet key; keeping this a closed enum lets both switch
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum FacetDescriptor {
    /// Enumerated options. `multiple` marks a multi-select group (`features`).
    Choice { options: Vec<&'static str>, multiple: bool },
    /// Numeric slider with a single ceiling selection.
    NumericRange { min: f64, max: f64 },
    /// Time-of-day slider in minutes since midnight with a single ceiling selection.
    TimeRange { min: u32, max: u32 },
    /// Case-insensitive substring search.
    FreeText { placeholder: &'static str },
}

impl FacetDescriptor {
    pub fn is_multi_select(&self) -> bool {
        matches!(self, Self::Choice { multiple: true, .. })
    }

    /// Options for choice facets; empty for every other shape.
    pub fn options(&self) -> &[&'static str] {
        match self {
            Self::Choice { options, .. } => options,
            _ => &[],
        }
    }
}

/// A named facet as it appears in a category's facet table.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub key: &'static str,
    pub descriptor: FacetDescriptor,
}

/// A read-only travel listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u32,
    pub category: Category,
    #[serde(rename = "type")]
    pub r#type: String,
    pub theme: String,
    pub activity: String,
    pub price: f64,
    /// Display time in `HH:MM AM/PM` form.
    pub start_time: String,
    /// Free text range such as `10-20 people`.
    pub group_size: String,
    pub vehicle: String,
    pub features: IndexSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Listing {
    /// Looks up a scalar attribute by its facet key.
    ///
    /// Returns `None` for keys the listing does not carry (for example `seating`
    /// or `venue`), which makes exact-match facets on those keys fail.
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        let value = match key {
            "id" => Cow::Owned(self.id.to_string()),
            "category" => Cow::Borrowed(self.category.as_str()),
            "type" => Cow::Borrowed(self.r#type.as_str()),
            "theme" => Cow::Borrowed(self.theme.as_str()),
            "activity" => Cow::Borrowed(self.activity.as_str()),
            "price" => Cow::Owned(format_price(self.price)),
            "startTime" => Cow::Borrowed(self.start_time.as_str()),
            "groupSize" => Cow::Borrowed(self.group_size.as_str()),
            "vehicle" => Cow::Borrowed(self.vehicle.as_str()),
            "location" => Cow::Borrowed(self.location.as_deref()?),
            _ => return None,
        };
        Some(value)
    }

    /// Features joined for display.
    pub fn features_display(&self) -> String {
        self.features.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Formats a price without a trailing `.0` for whole amounts.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{price:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("tickets".parse::<Category>(), Ok(Category::Tickets));
        assert_eq!(" RENT ".parse::<Category>(), Ok(Category::Rent));
        let err = "boats".parse::<Category>().unwrap_err();
        assert_eq!(err, ParseCategoryError("boats".into()));
    }

    #[test]
    fn category_cycles_in_navigation_order() {
        assert_eq!(Category::Transfer.next(), Category::Tours);
        assert_eq!(Category::Tours.prev(), Category::Transfer);
        assert_eq!(Category::Tickets.next(), Category::Rent);
    }

    #[test]
    fn listing_deserializes_from_camel_case() {
        let json = r#"{
            "id": 7,
            "category": "Rent",
            "type": "Catamaran",
            "theme": "Family",
            "activity": "Sightseeing",
            "price": 320,
            "startTime": "08:30 AM",
            "groupSize": "4-8 people",
            "vehicle": "Catamaran",
            "features": ["With Captain"]
        }"#;
        let listing: Listing = serde_json::from_str(json).expect("deserialize listing");
        assert_eq!(listing.r#type, "Catamaran");
        assert_eq!(listing.start_time, "08:30 AM");
        assert!(listing.location.is_none());
        assert_eq!(listing.attribute("type").as_deref(), Some("Catamaran"));
        assert_eq!(listing.attribute("price").as_deref(), Some("320"));
        assert_eq!(listing.attribute("location"), None);
        assert_eq!(listing.attribute("seating"), None);
    }

    #[test]
    fn price_formatting_drops_whole_fraction() {
        assert_eq!(format_price(150.0), "150");
        assert_eq!(format_price(99.5), "99.50");
    }
}
