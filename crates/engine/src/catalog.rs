//! Category registry: the fixed facet table of every category.
//!
//! Facet order is significant; the filter panel renders groups in this order.

use localmarket_types::{Category, Facet, FacetDescriptor};
use localmarket_util::LAST_MINUTE;
use once_cell::sync::Lazy;

/// Upper bound of every price slider.
pub const MAX_PRICE: f64 = 25_000.0;
/// Upper bound of the group size slider.
pub const MAX_GROUP_SIZE: f64 = 100.0;

fn choice(key: &'static str, options: &[&'static str]) -> Facet {
    Facet {
        key,
        descriptor: FacetDescriptor::Choice {
            options: options.to_vec(),
            multiple: false,
        },
    }
}

fn multi_choice(key: &'static str, options: &[&'static str]) -> Facet {
    Facet {
        key,
        descriptor: FacetDescriptor::Choice {
            options: options.to_vec(),
            multiple: true,
        },
    }
}

fn numeric(key: &'static str, min: f64, max: f64) -> Facet {
    Facet {
        key,
        descriptor: FacetDescriptor::NumericRange { min, max },
    }
}

fn price() -> Facet {
    numeric("price", 0.0, MAX_PRICE)
}

static TOURS: Lazy<Vec<Facet>> = Lazy::new(|| {
    vec![
        Facet {
            key: "location",
            descriptor: FacetDescriptor::FreeText {
                placeholder: "Where you wanna visit? (Phi Phi island, Chalong temple...)",
            },
        },
        choice("theme", &["Adventure", "Cultural", "Luxury"]),
        choice("activity", &["Swimming", "Running", "Elephant care", "Snorkeling"]),
        price(),
        Facet {
            key: "startTime",
            descriptor: FacetDescriptor::TimeRange { min: 0, max: LAST_MINUTE },
        },
        numeric("groupSize", 0.0, MAX_GROUP_SIZE),
        choice("vehicle", &["Yacht", "Speedboat", "Safari", "Catamaran", "Speedcatamaran"]),
        multi_choice("features", &["Transfer", "Halal Food", "Vegetarian food"]),
    ]
});

static TICKETS: Lazy<Vec<Facet>> = Lazy::new(|| {
    vec![
        choice("theme", &["Music", "Theater", "Festival"]),
        choice("activity", &["Concert", "Play", "Dance"]),
        price(),
        choice("startTime", &["Morning", "Afternoon", "Evening"]),
        choice("seating", &["VIP", "Standard", "Economy"]),
        choice("venue", &["Indoor", "Outdoor"]),
    ]
});

static RENT: Lazy<Vec<Facet>> = Lazy::new(|| {
    vec![
        choice("theme", &["Luxury", "Adventure", "Family"]),
        choice("activity", &["Party", "Sightseeing", "Sports"]),
        price(),
        choice("duration", &["Half Day", "Full Day", "Weekly"]),
        choice("capacity", &["2-4", "4-8", "8+"]),
        multi_choice("features", &["With Captain", "Self-Drive", "All Inclusive"]),
    ]
});

static TRANSFER: Lazy<Vec<Facet>> = Lazy::new(|| {
    vec![
        choice("vehicle", &["Sedan", "Van", "Bus"]),
        price(),
        choice("capacity", &["1-4", "5-8", "9+"]),
        choice("service", &["One-way", "Round-trip", "Hourly"]),
        multi_choice("features", &["Meet & Greet", "Luggage Help", "WiFi"]),
    ]
});

/// Ordered facet table for a category.
pub fn facets(category: Category) -> &'static [Facet] {
    match category {
        Category::Tours => &TOURS,
        Category::Tickets => &TICKETS,
        Category::Rent => &RENT,
        Category::Transfer => &TRANSFER,
    }
}

/// Looks up a single facet of a category by key.
pub fn facet(category: Category, key: &str) -> Option<&'static Facet> {
    facets(category).iter().find(|facet| facet.key == key)
}

/// Returns `true` when the category's facet table contains `key`.
pub fn has_facet(category: Category, key: &str) -> bool {
    facet(category, key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_order_follows_registry_table() {
        let keys: Vec<&str> = facets(Category::Tours).iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec!["location", "theme", "activity", "price", "startTime", "groupSize", "vehicle", "features"]
        );
        let keys: Vec<&str> = facets(Category::Transfer).iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["vehicle", "price", "capacity", "service", "features"]);
    }

    #[test]
    fn every_category_has_a_price_slider() {
        for category in Category::ALL {
            let price = facet(category, "price").expect("price facet");
            assert_eq!(price.descriptor, FacetDescriptor::NumericRange { min: 0.0, max: MAX_PRICE });
        }
    }

    #[test]
    fn features_are_multi_select_where_present() {
        assert!(facet(Category::Tours, "features").expect("tours features").descriptor.is_multi_select());
        assert!(facet(Category::Rent, "features").expect("rent features").descriptor.is_multi_select());
        assert!(!has_facet(Category::Tickets, "features"));
        assert!(!facet(Category::Tours, "theme").expect("theme").descriptor.is_multi_select());
    }

    #[test]
    fn ticket_start_time_is_a_day_part_choice() {
        let start = facet(Category::Tickets, "startTime").expect("startTime");
        assert_eq!(start.descriptor.options(), &["Morning", "Afternoon", "Evening"]);
    }
}
