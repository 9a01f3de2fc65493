//! Terrain types and their base yields

use serde::{Deserialize, Serialize};

/// Terrain of a map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Desert,
    Plains,
    Grassland,
    Forest,
    Hills,
    Mountains,
    Tundra,
    Glacier,
    Swamp,
    Jungle,
    Ocean,
}

impl Terrain {
    pub const ALL: [Terrain; 11] = [
        Terrain::Desert,
        Terrain::Plains,
        Terrain::Grassland,
        Terrain::Forest,
        Terrain::Hills,
        Terrain::Mountains,
        Terrain::Tundra,
        Terrain::Glacier,
        Terrain::Swamp,
        Terrain::Jungle,
        Terrain::Ocean,
    ];

    fn index(self) -> usize {
        match self {
            Terrain::Desert => 0,
            Terrain::Plains => 1,
            Terrain::Grassland => 2,
            Terrain::Forest => 3,
            Terrain::Hills => 4,
            Terrain::Mountains => 5,
            Terrain::Tundra => 6,
            Terrain::Glacier => 7,
            Terrain::Swamp => 8,
            Terrain::Jungle => 9,
            Terrain::Ocean => 10,
        }
    }

    /// Parse a terrain name as written in ruleset files (case-insensitive)
    pub fn from_name(name: &str) -> Option<Terrain> {
        let terrain = match name.to_lowercase().as_str() {
            "desert" => Terrain::Desert,
            "plains" => Terrain::Plains,
            "grassland" => Terrain::Grassland,
            "forest" => Terrain::Forest,
            "hills" => Terrain::Hills,
            "mountains" => Terrain::Mountains,
            "tundra" => Terrain::Tundra,
            "glacier" => Terrain::Glacier,
            "swamp" => Terrain::Swamp,
            "jungle" => Terrain::Jungle,
            "ocean" => Terrain::Ocean,
            _ => return None,
        };
        Some(terrain)
    }
}

/// Yields of one terrain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainRules {
    pub terrain: Terrain,
    pub food: i32,
    pub shields: i32,
    pub trade: i32,
    /// Extra food from irrigation (0 = cannot irrigate)
    pub irrigation_bonus: i32,
    /// Extra shields from a mine (0 = cannot mine)
    pub mining_bonus: i32,
    /// Extra trade from a road
    pub road_trade_bonus: i32,
}

impl TerrainRules {
    pub const fn new(terrain: Terrain, food: i32, shields: i32, trade: i32) -> Self {
        Self {
            terrain,
            food,
            shields,
            trade,
            irrigation_bonus: 0,
            mining_bonus: 0,
            road_trade_bonus: 0,
        }
    }

    pub const fn irrigate(mut self, bonus: i32) -> Self {
        self.irrigation_bonus = bonus;
        self
    }

    pub const fn mine(mut self, bonus: i32) -> Self {
        self.mining_bonus = bonus;
        self
    }

    pub const fn road(mut self, bonus: i32) -> Self {
        self.road_trade_bonus = bonus;
        self
    }
}

/// Yield table covering every terrain type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainTable {
    entries: [TerrainRules; 11],
}

impl Default for TerrainTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TerrainTable {
    /// Classic ruleset yields
    pub fn with_defaults() -> Self {
        Self {
            entries: [
                TerrainRules::new(Terrain::Desert, 0, 1, 0).irrigate(1).mine(1).road(1),
                TerrainRules::new(Terrain::Plains, 1, 1, 0).irrigate(1).road(1),
                TerrainRules::new(Terrain::Grassland, 2, 0, 0).irrigate(1).road(1),
                TerrainRules::new(Terrain::Forest, 1, 2, 0),
                TerrainRules::new(Terrain::Hills, 1, 0, 0).irrigate(1).mine(3),
                TerrainRules::new(Terrain::Mountains, 0, 1, 0).mine(2),
                TerrainRules::new(Terrain::Tundra, 1, 0, 0).irrigate(1),
                TerrainRules::new(Terrain::Glacier, 0, 0, 0).mine(1),
                TerrainRules::new(Terrain::Swamp, 1, 0, 0),
                TerrainRules::new(Terrain::Jungle, 1, 0, 0),
                TerrainRules::new(Terrain::Ocean, 1, 0, 2),
            ],
        }
    }

    pub fn get(&self, terrain: Terrain) -> &TerrainRules {
        &self.entries[terrain.index()]
    }

    /// Replace the entry for `rules.terrain`
    pub fn set(&mut self, rules: TerrainRules) {
        self.entries[rules.terrain.index()] = rules;
    }

    pub fn all(&self) -> &[TerrainRules] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_indexed_by_terrain() {
        let table = TerrainTable::with_defaults();
        for terrain in Terrain::ALL {
            assert_eq!(table.get(terrain).terrain, terrain);
        }
    }

    #[test]
    fn test_set_replaces_entry() {
        let mut table = TerrainTable::with_defaults();
        table.set(TerrainRules::new(Terrain::Grassland, 3, 1, 1));
        assert_eq!(table.get(Terrain::Grassland).food, 3);
        assert_eq!(table.get(Terrain::Plains).food, 1);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Terrain::from_name("Grassland"), Some(Terrain::Grassland));
        assert_eq!(Terrain::from_name("OCEAN"), Some(Terrain::Ocean));
        assert_eq!(Terrain::from_name("lava"), None);
    }
}
