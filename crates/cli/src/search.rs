//! `localmarket search`: evaluates filters given as flags and prints the
//! visible listings.

use clap::Args;
use localmarket_engine::catalog;
use localmarket_types::{Category, FEATURES_KEY, FilterState, FilterValue, Listing, START_TIME_KEY, format_price};
use localmarket_util::parse_minutes;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseFilterError {
    #[error("expected KEY=VALUE, got `{0}`")]
    InvalidAssignment(String),
    #[error("category {category} has no `{key}` filter")]
    UnknownFacet { key: String, category: Category },
    #[error("invalid start time `{0}`; use HH:MM or HH:MM AM/PM")]
    InvalidTime(String),
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Maximum price
    #[arg(long)]
    pub price: Option<f64>,

    /// Latest start time (HH:MM or HH:MM AM/PM)
    #[arg(long)]
    pub start_time: Option<String>,

    /// Maximum group size
    #[arg(long)]
    pub group_size: Option<f64>,

    /// Required feature; repeat for more
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Location substring
    #[arg(long)]
    pub location: Option<String>,

    /// Any other facet as KEY=VALUE, e.g. theme=Cultural
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Print JSON instead of text cards
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Builds the filter selections these flags describe for `category`.
    pub fn to_filters(&self, category: Category) -> Result<FilterState, ParseFilterError> {
        let mut filters = FilterState::new();
        if let Some(price) = self.price {
            filters.set("price", FilterValue::Number(price));
        }
        if let Some(time) = self.start_time.as_deref() {
            if parse_minutes(time).is_none() {
                return Err(ParseFilterError::InvalidTime(time.to_string()));
            }
            filters.set(START_TIME_KEY, FilterValue::text(time.trim()));
        }
        if let Some(size) = self.group_size {
            filters.set("groupSize", FilterValue::Number(size));
        }
        if !self.features.is_empty() {
            filters.set(FEATURES_KEY, FilterValue::set(self.features.iter().cloned()));
        }
        if let Some(location) = self.location.as_deref() {
            filters.set("location", FilterValue::text(location));
        }
        for assignment in &self.assignments {
            let (key, value) = parse_assignment(assignment)?;
            if !catalog::has_facet(category, key) {
                return Err(ParseFilterError::UnknownFacet {
                    key: key.to_string(),
                    category,
                });
            }
            filters.set(key, FilterValue::text(value));
        }
        Ok(filters)
    }
}

fn parse_assignment(input: &str) -> Result<(&str, &str), ParseFilterError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseFilterError::InvalidAssignment(input.to_string())),
    }
}

/// Plain-text cards, one block per listing.
pub fn render_text(listings: &[&Listing]) -> String {
    if listings.is_empty() {
        return "No results found based on selected filters.".to_string();
    }
    let mut blocks = Vec::with_capacity(listings.len());
    for listing in listings {
        let mut lines = vec![format!("{} (#{})", listing.r#type, listing.id)];
        if let Some(location) = listing.location.as_deref() {
            lines.push(format!("  {location}"));
        }
        lines.push(format!("  Theme: {}", listing.theme));
        lines.push(format!("  Activity: {}", listing.activity));
        lines.push(format!("  Price: ${}", format_price(listing.price)));
        lines.push(format!("  Start Time: {}", listing.start_time));
        lines.push(format!("  Group Size: {}", listing.group_size));
        lines.push(format!("  Vehicle: {}", listing.vehicle));
        lines.push(format!("  Features: {}", listing.features_display()));
        blocks.push(lines.join("\n"));
    }
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use localmarket_engine::{MarketState, seed_store};

    fn visible_types(category: Category, args: &SearchArgs) -> Vec<String> {
        let filters = args.to_filters(category).expect("filters");
        let state = MarketState::with_filters(seed_store(), category, filters);
        state.visible().map(|l| l.r#type.clone()).collect()
    }

    #[test]
    fn flags_build_compound_filters() {
        let args = SearchArgs {
            price: Some(130.0),
            features: vec!["Historical Sites".into()],
            ..Default::default()
        };
        assert_eq!(visible_types(Category::Tours, &args), vec!["Land Tour"]);

        let args = SearchArgs {
            features: vec!["Open Bar".into()],
            ..Default::default()
        };
        assert_eq!(visible_types(Category::Tours, &args), vec!["Yacht"]);
    }

    #[test]
    fn assignments_target_declared_facets() {
        let args = SearchArgs {
            assignments: vec!["theme = Cultural".into()],
            ..Default::default()
        };
        assert_eq!(visible_types(Category::Tickets, &args), vec!["Land Tour"]);

        let args = SearchArgs {
            assignments: vec!["groupSize=10".into()],
            ..Default::default()
        };
        assert_eq!(
            args.to_filters(Category::Tickets),
            Err(ParseFilterError::UnknownFacet {
                key: "groupSize".into(),
                category: Category::Tickets
            })
        );
    }

    #[test]
    fn malformed_flags_are_rejected() {
        let args = SearchArgs {
            assignments: vec!["=Cultural".into()],
            ..Default::default()
        };
        assert_eq!(
            args.to_filters(Category::Tours),
            Err(ParseFilterError::InvalidAssignment("=Cultural".into()))
        );

        let args = SearchArgs {
            start_time: Some("noon".into()),
            ..Default::default()
        };
        assert_eq!(args.to_filters(Category::Tours), Err(ParseFilterError::InvalidTime("noon".into())));
    }

    #[test]
    fn text_output_lists_card_fields() {
        let store = seed_store();
        let text = render_text(&[&store[1]]);
        assert!(text.starts_with("Land Tour (#2)"));
        assert!(text.contains("Price: $120"));
        assert!(text.contains("Features: Historical Sites, Guided Tour"));
        assert_eq!(render_text(&[]), "No results found based on selected filters.");
    }
}
