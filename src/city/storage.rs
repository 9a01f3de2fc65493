//! Food Storage Manager: food carried over when a city changes size

use tracing::{debug, warn};

use crate::city::state::City;
use crate::rules::improvements::ImprovementEffect;

/// Combined storage percentage of the city's improvements, if any store food.
///
/// A total outside 0..=100 means the ruleset data is malformed; the largest
/// single in-range magnitude is used instead (0 if none is in range).
pub fn storage_percentage(city: &City) -> Option<i32> {
    // Map iteration order; only the sum and the max are used
    let magnitudes: Vec<i32> = city
        .improvements()
        .filter_map(|i| i.effect(ImprovementEffect::FoodStorage))
        .collect();
    if magnitudes.is_empty() {
        return None;
    }

    let total: i32 = magnitudes.iter().sum();
    if (0..=100).contains(&total) {
        return Some(total);
    }

    let fallback = magnitudes
        .iter()
        .copied()
        .filter(|m| (0..=100).contains(m))
        .max()
        .unwrap_or(0);
    warn!(city = %city.name, total, fallback, "food storage total out of range");
    Some(fallback)
}

/// Empty the food box, then refill the share kept by storage improvements
pub fn reset_food_storage(city: &mut City, food_rows: i32) {
    city.food_in_storage = 0;

    let Some(percentage) = storage_percentage(city) else {
        return;
    };
    if percentage == 0 {
        return;
    }

    city.food_in_storage += city.food_box_capacity(food_rows) * percentage / 100;
    debug!(city = %city.name, percentage, stored = city.food_in_storage, "reset food storage");
}
