/// Shipping estimation and the degrade-gracefully default rates.
// region:    --- Imports
use crate::checkout::model::{PackageEstimate, ShippingRate};

// endregion: --- Imports

// region:    --- Package Estimate

const UNIT_WEIGHT_KG: f64 = 1.0;
const BASE_HEIGHT_CM: f64 = 10.0;
const HEIGHT_PER_ITEM_CM: f64 = 5.0;

/// Approximate the parcel from the number of cart items: one weight unit per
/// item, a fixed footprint, and a height that grows with the item count.
pub fn estimate_package(item_count: usize) -> PackageEstimate {
    let items = item_count as f64;
    PackageEstimate {
        weight_kg: items * UNIT_WEIGHT_KG,
        length_cm: 35.0,
        width_cm: 25.0,
        height_cm: BASE_HEIGHT_CM + HEIGHT_PER_ITEM_CM * items,
    }
}

// endregion: --- Package Estimate

// region:    --- Default Rates

/// Fixed two-tier fallback used when the rate provider is unavailable, so
/// checkout can always proceed.
pub fn default_rates() -> Vec<ShippingRate> {
    vec![
        ShippingRate {
            rate_id: "default-standard".to_string(),
            provider: "Purple Dog".to_string(),
            service_level: "Standard".to_string(),
            amount: 12.50,
            duration_label: "5-7 business days".to_string(),
            estimated_days: 7,
        },
        ShippingRate {
            rate_id: "default-express".to_string(),
            provider: "Purple Dog".to_string(),
            service_level: "Express".to_string(),
            amount: 22.00,
            duration_label: "1-2 business days".to_string(),
            estimated_days: 2,
        },
    ]
}

/// Per-item share of the quoted rate, split evenly across the cart.
pub fn split_evenly(total: f64, item_count: usize) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    total / item_count as f64
}

// endregion: --- Default Rates

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_grows_with_item_count() {
        let one = estimate_package(1);
        let three = estimate_package(3);
        assert_eq!(one.weight_kg, 1.0);
        assert_eq!(three.weight_kg, 3.0);
        assert!(three.height_cm > one.height_cm);
    }

    #[test]
    fn fallback_offers_two_tiers_within_policy() {
        let rates = default_rates();
        assert_eq!(rates.len(), 2);
        assert!(rates[0].amount >= 8.50 && rates[0].amount <= 15.00);
        assert!(rates[1].amount >= 15.00 && rates[1].amount <= 25.00);
    }

    #[test]
    fn even_split_covers_the_total() {
        assert_eq!(split_evenly(10.0, 2), 5.0);
        assert_eq!(split_evenly(10.0, 0), 0.0);
    }
}

// endregion: --- Tests
