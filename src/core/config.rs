//! Ruleset constants with documented defaults
//!
//! These are the "cosmic" numbers of the classic ruleset. Every value can be
//! overridden from a ruleset file; omitted keys keep the defaults below.

use serde::{Deserialize, Serialize};

/// Constants that drive the city economy formulas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmicRules {
    // === FOOD ===
    /// Food each citizen eats per turn
    ///
    /// City consumption is `size * food_eaten_per_turn` plus settler upkeep.
    pub food_eaten_per_turn: i32,

    /// Food eaten by each settler-role unit under Monarchy or lower
    pub settlers_eat_till_monarchy: i32,

    /// Food eaten by each settler-role unit under Communism or higher
    pub settlers_eat_from_communism: i32,

    /// Rows in the food box
    ///
    /// The box holds `(size + 1) * food_box_rows` food. Storage buildings
    /// keep a percentage of that when the city changes size.
    pub food_box_rows: i32,

    // === UNIT SUPPORT ===
    /// Units a Communist city supports without shield upkeep
    pub communism_pays_support: i32,

    /// Units a Monarchy city supports without shield upkeep
    pub monarchy_pays_support: i32,

    /// Units a Fundamentalist city supports without shield upkeep
    pub fundamentalism_pays_support: i32,

    // === CORRUPTION ===
    /// Palace distance every Communist city is treated as having
    ///
    /// Communism flattens corruption: distance to the capital is ignored and
    /// this fixed value is used instead.
    pub communism_equivalent_palace_distance: i32,
}

impl Default for CosmicRules {
    fn default() -> Self {
        Self {
            food_eaten_per_turn: 2,
            settlers_eat_till_monarchy: 1,
            settlers_eat_from_communism: 2,
            food_box_rows: 10,

            communism_pays_support: 3,
            monarchy_pays_support: 3,
            fundamentalism_pays_support: 10,

            communism_equivalent_palace_distance: 10,
        }
    }
}

impl CosmicRules {
    /// Create rules with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the constants for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("food_eaten_per_turn", self.food_eaten_per_turn),
            ("settlers_eat_till_monarchy", self.settlers_eat_till_monarchy),
            ("settlers_eat_from_communism", self.settlers_eat_from_communism),
            ("communism_pays_support", self.communism_pays_support),
            ("monarchy_pays_support", self.monarchy_pays_support),
            ("fundamentalism_pays_support", self.fundamentalism_pays_support),
            (
                "communism_equivalent_palace_distance",
                self.communism_equivalent_palace_distance,
            ),
        ];
        for (name, value) in non_negative {
            if value < 0 {
                return Err(format!("{} ({}) must not be negative", name, value));
            }
        }

        if self.food_box_rows <= 0 {
            return Err(format!(
                "food_box_rows ({}) must be positive",
                self.food_box_rows
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CosmicRules::default().validate().is_ok());
    }

    #[test]
    fn test_negative_support_rejected() {
        let rules = CosmicRules {
            monarchy_pays_support: -1,
            ..CosmicRules::default()
        };
        let err = rules.validate().unwrap_err();
        assert!(err.contains("monarchy_pays_support"));
    }

    #[test]
    fn test_zero_food_rows_rejected() {
        let rules = CosmicRules {
            food_box_rows: 0,
            ..CosmicRules::default()
        };
        assert!(rules.validate().is_err());
    }
}
