//! # Text Processing Utilities
//!
//! Helpers for turning facet keys and listing attributes into display text,
//! and for reading the numeric bounds hidden in free-text fields.

use heck::ToTitleCase;
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

static RANGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)").expect("valid range regex"));
static SINGLE_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\D*?(\d+(?:\.\d+)?)(\s*\+)?").expect("valid number regex"));

/// Converts a facet key into a heading.
///
/// # Example
/// ```rust
/// use localmarket_util::text_processing::facet_title;
///
/// assert_eq!(facet_title("startTime"), "Start Time");
/// assert_eq!(facet_title("theme"), "Theme");
/// ```
pub fn facet_title(key: &str) -> String {
    key.to_title_case()
}

/// Extracts the upper bound of a free-text size range such as `10-20 people`.
///
/// A lone number (`8 people`) is its own upper bound. Open-ended values
/// (`8+`) and text without digits have no upper bound and return `None`.
pub fn range_upper_bound(input: &str) -> Option<f64> {
    if let Some(captures) = RANGE_PATTERN.captures(input) {
        return captures.get(2).and_then(|m| m.as_str().parse().ok());
    }
    let captures = SINGLE_NUMBER_PATTERN.captures(input.trim())?;
    if captures.get(2).is_some() {
        return None;
    }
    captures.get(1).and_then(|m| m.as_str().parse().ok())
}

/// Truncates `text` to at most `max_width` terminal cells, appending `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Wraps `text` into lines no wider than `width` cells.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1)).into_iter().map(|line| line.into_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_titles() {
        assert_eq!(facet_title("groupSize"), "Group Size");
        assert_eq!(facet_title("features"), "Features");
        assert_eq!(facet_title("location"), "Location");
    }

    #[test]
    fn upper_bounds_from_free_text() {
        assert_eq!(range_upper_bound("10-20 people"), Some(20.0));
        assert_eq!(range_upper_bound("5 - 15 people"), Some(15.0));
        assert_eq!(range_upper_bound("20-40 people"), Some(40.0));
        assert_eq!(range_upper_bound("4 to 8"), Some(8.0));
        assert_eq!(range_upper_bound("12 people"), Some(12.0));
        assert_eq!(range_upper_bound("8+"), None);
        assert_eq!(range_upper_bound("private"), None);
        assert_eq!(range_upper_bound(""), None);
    }

    #[test]
    fn truncation_respects_cell_width() {
        assert_eq!(truncate_to_width("Island Tour", 20), "Island Tour");
        assert_eq!(truncate_to_width("Island Tour", 7), "Island…");
        assert_eq!(truncate_to_width("Island Tour", 0), "");
    }

    #[test]
    fn wrapping_splits_on_words() {
        let lines = wrap_to_width("Historical Sites, Guided Tour", 17);
        assert_eq!(lines, vec!["Historical Sites,", "Guided Tour"]);
    }
}
