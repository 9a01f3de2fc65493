//! Ruleset loading from TOML or JSON
//!
//! A ruleset file may override any subset of the defaults:
//!
//! ```toml
//! [cosmic]
//! food_eaten_per_turn = 2
//!
//! [[terrain]]
//! terrain = "grassland"
//! food = 2
//! irrigation_bonus = 1
//! road_trade_bonus = 1
//!
//! [[improvement]]
//! kind = "granary"
//! effects = [{ effect = "food_storage", value = 50 }]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::core::config::CosmicRules;
use crate::core::error::{EconomyError, Result};
use crate::rules::improvements::{Improvement, ImprovementCatalog, ImprovementEffect, ImprovementType};
use crate::rules::terrain::{Terrain, TerrainRules, TerrainTable};

/// Everything the city economy needs from the ruleset
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    pub cosmic: CosmicRules,
    pub terrain: TerrainTable,
    pub improvements: ImprovementCatalog,
}

impl Ruleset {
    pub fn with_defaults() -> Self {
        Self {
            cosmic: CosmicRules::default(),
            terrain: TerrainTable::with_defaults(),
            improvements: ImprovementCatalog::with_defaults(),
        }
    }

    /// Load a ruleset from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a ruleset from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: RulesetFile = toml::from_str(content)?;
        file.into_ruleset()
    }

    /// Parse a ruleset from a JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let file: RulesetFile = serde_json::from_str(content)?;
        file.into_ruleset()
    }
}

/// On-disk representation shared by the TOML and JSON formats
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RulesetFile {
    cosmic: Option<CosmicRules>,
    terrain: Vec<FileTerrain>,
    improvement: Vec<FileImprovement>,
}

#[derive(Debug, Deserialize)]
struct FileTerrain {
    terrain: String,
    #[serde(default)]
    food: i32,
    #[serde(default)]
    shields: i32,
    #[serde(default)]
    trade: i32,
    #[serde(default)]
    irrigation_bonus: i32,
    #[serde(default)]
    mining_bonus: i32,
    #[serde(default)]
    road_trade_bonus: i32,
}

#[derive(Debug, Deserialize)]
struct FileImprovement {
    kind: String,
    name: Option<String>,
    #[serde(default)]
    effects: Vec<FileEffect>,
}

#[derive(Debug, Deserialize)]
struct FileEffect {
    effect: String,
    value: i32,
}

impl RulesetFile {
    fn into_ruleset(self) -> Result<Ruleset> {
        let mut ruleset = Ruleset::with_defaults();

        if let Some(cosmic) = self.cosmic {
            cosmic.validate().map_err(EconomyError::InvalidRuleset)?;
            ruleset.cosmic = cosmic;
        }

        for entry in self.terrain {
            ruleset.terrain.set(entry.into_terrain_rules()?);
        }

        for entry in self.improvement {
            ruleset.improvements.add(entry.into_improvement()?);
        }

        Ok(ruleset)
    }
}

impl FileTerrain {
    fn into_terrain_rules(self) -> Result<TerrainRules> {
        let terrain = Terrain::from_name(&self.terrain).ok_or_else(|| {
            EconomyError::InvalidRuleset(format!("unknown terrain: {}", self.terrain))
        })?;
        Ok(TerrainRules::new(terrain, self.food, self.shields, self.trade)
            .irrigate(self.irrigation_bonus)
            .mine(self.mining_bonus)
            .road(self.road_trade_bonus))
    }
}

impl FileImprovement {
    fn into_improvement(self) -> Result<Improvement> {
        let kind = ImprovementType::from_name(&self.kind).ok_or_else(|| {
            EconomyError::InvalidRuleset(format!("unknown improvement: {}", self.kind))
        })?;

        let mut improvement = Improvement::new(kind);
        if let Some(name) = self.name {
            improvement.name = name;
        }
        for entry in self.effects {
            let effect = ImprovementEffect::from_name(&entry.effect).ok_or_else(|| {
                EconomyError::InvalidRuleset(format!("unknown effect: {}", entry.effect))
            })?;
            improvement.effects.insert(effect, entry.value);
        }
        Ok(improvement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let ruleset = Ruleset::parse_toml("").unwrap();
        assert_eq!(ruleset.cosmic, CosmicRules::default());
        assert_eq!(ruleset.terrain, TerrainTable::with_defaults());
        assert_eq!(
            ruleset.improvements.all().len(),
            ImprovementType::ALL.len()
        );
    }

    #[test]
    fn test_parse_toml_overrides() {
        let toml = r#"
            [cosmic]
            food_eaten_per_turn = 3
            monarchy_pays_support = 2

            [[terrain]]
            terrain = "Grassland"
            food = 3
            irrigation_bonus = 2

            [[improvement]]
            kind = "granary"
            effects = [{ effect = "food_storage", value = 30 }]

            [[improvement]]
            kind = "Harbour"
            name = "Port"
            effects = [{ effect = "FoodStorage", value = 10 }]
        "#;

        let ruleset = Ruleset::parse_toml(toml).unwrap();
        assert_eq!(ruleset.cosmic.food_eaten_per_turn, 3);
        assert_eq!(ruleset.cosmic.monarchy_pays_support, 2);
        // Keys not present keep their defaults
        assert_eq!(ruleset.cosmic.fundamentalism_pays_support, 10);

        let grassland = ruleset.terrain.get(Terrain::Grassland);
        assert_eq!(grassland.food, 3);
        assert_eq!(grassland.irrigation_bonus, 2);
        assert_eq!(grassland.road_trade_bonus, 0);

        let granary = ruleset.improvements.instantiate(ImprovementType::Granary);
        assert_eq!(granary.effect(ImprovementEffect::FoodStorage), Some(30));

        let harbour = ruleset.improvements.instantiate(ImprovementType::Harbour);
        assert_eq!(harbour.name, "Port");
        assert_eq!(harbour.effect(ImprovementEffect::FoodStorage), Some(10));
    }

    #[test]
    fn test_unknown_terrain_is_rejected() {
        let toml = r#"
            [[terrain]]
            terrain = "lava"
        "#;
        let err = Ruleset::parse_toml(toml).unwrap_err();
        assert!(matches!(err, EconomyError::InvalidRuleset(msg) if msg.contains("lava")));
    }

    #[test]
    fn test_invalid_cosmic_is_rejected() {
        let toml = r#"
            [cosmic]
            food_box_rows = 0
        "#;
        assert!(matches!(
            Ruleset::parse_toml(toml),
            Err(EconomyError::InvalidRuleset(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_toml_error() {
        assert!(matches!(
            Ruleset::parse_toml("[cosmic"),
            Err(EconomyError::TomlError(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "cosmic": { "communism_equivalent_palace_distance": 12 },
            "improvement": [
                { "kind": "Palace", "effects": [{ "effect": "capital", "value": 1 }] }
            ]
        }"#;
        let ruleset = Ruleset::from_json(json).unwrap();
        assert_eq!(ruleset.cosmic.communism_equivalent_palace_distance, 12);
        assert!(ruleset
            .improvements
            .instantiate(ImprovementType::Palace)
            .has_effect(ImprovementEffect::Capital));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Ruleset::load_from_toml(Path::new("/nonexistent/ruleset.toml"));
        assert!(matches!(result, Err(EconomyError::IoError(_))));
    }
}
