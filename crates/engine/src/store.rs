//! Listing store: the fixed set of listings seeded at startup.

use std::sync::Arc;

use indexmap::IndexSet;
use localmarket_types::{Category, Listing};

#[allow(clippy::too_many_arguments)]
fn listing(
    id: u32,
    category: Category,
    kind: &str,
    theme: &str,
    activity: &str,
    price: f64,
    start_time: &str,
    group_size: &str,
    vehicle: &str,
    features: &[&str],
) -> Listing {
    Listing {
        id,
        category,
        r#type: kind.to_string(),
        theme: theme.to_string(),
        activity: activity.to_string(),
        price,
        start_time: start_time.to_string(),
        group_size: group_size.to_string(),
        vehicle: vehicle.to_string(),
        features: features.iter().map(|f| f.to_string()).collect::<IndexSet<_>>(),
        location: None,
    }
}

/// Builds the seed listings in display order.
pub fn seed_listings() -> Vec<Listing> {
    vec![
        listing(
            1,
            Category::Tours,
            "Island Tour",
            "Adventure",
            "Snorkeling",
            150.0,
            "09:00 AM",
            "10-20 people",
            "Boat",
            &["Scenic Views", "Private Tour"],
        ),
        listing(
            2,
            Category::Tours,
            "Land Tour",
            "Cultural",
            "City Sightseeing",
            120.0,
            "10:00 AM",
            "5-15 people",
            "Bus",
            &["Historical Sites", "Guided Tour"],
        ),
        listing(
            3,
            Category::Rent,
            "Yacht",
            "Luxury",
            "Private Party",
            500.0,
            "01:00 PM",
            "20-40 people",
            "Yacht",
            &["Open Bar", "Music System"],
        ),
    ]
}

/// Shared, read-only handle to the seeded listings.
pub fn seed_store() -> Arc<[Listing]> {
    Arc::from(seed_listings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_and_ordered() {
        let store = seed_store();
        let ids: Vec<u32> = store.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), store.len());
    }

    #[test]
    fn seed_features_keep_declared_order() {
        let store = seed_store();
        assert_eq!(store[1].features_display(), "Historical Sites, Guided Tour");
        assert_eq!(store[2].category, Category::Rent);
    }

    #[test]
    fn seed_listings_carry_no_location() {
        assert!(seed_store().iter().all(|listing| listing.location.is_none()));
    }
}
