//! Tile Yield Provider: food, shields and trade of a single tile

use crate::rules::terrain::{TerrainRules, TerrainTable};
use crate::world::map::Tile;

/// Per-tile yields as seen by the city economy. Implementations must be pure.
pub trait TileYield {
    fn food(&self, low_organisation: bool) -> i32;
    fn shields(&self, low_organisation: bool) -> i32;
    fn trade(&self, organisation_level: u8) -> i32;
}

/// A tile paired with the yield rules of its terrain
#[derive(Debug, Clone, Copy)]
pub struct RatedTile<'a> {
    tile: &'a Tile,
    rules: &'a TerrainRules,
}

impl<'a> RatedTile<'a> {
    pub fn new(tile: &'a Tile, table: &'a TerrainTable) -> Self {
        Self {
            tile,
            rules: table.get(tile.terrain),
        }
    }
}

/// Low organisation shaves one point off any yield above two
fn low_organisation_penalty(value: i32, low_organisation: bool) -> i32 {
    if low_organisation && value > 2 {
        value - 1
    } else {
        value
    }
}

impl TileYield for RatedTile<'_> {
    fn food(&self, low_organisation: bool) -> i32 {
        let mut food = self.rules.food;
        if self.tile.irrigation {
            food += self.rules.irrigation_bonus;
        }
        low_organisation_penalty(food, low_organisation)
    }

    fn shields(&self, low_organisation: bool) -> i32 {
        let mut shields = self.rules.shields;
        if self.tile.mine {
            shields += self.rules.mining_bonus;
        }
        if self.tile.railroad {
            shields += shields / 2;
        }
        low_organisation_penalty(shields, low_organisation)
    }

    fn trade(&self, organisation_level: u8) -> i32 {
        let mut trade = self.rules.trade;
        if self.tile.road || self.tile.railroad {
            trade += self.rules.road_trade_bonus;
        }
        if organisation_level >= 2 && trade > 0 {
            trade += 1;
        }
        low_organisation_penalty(trade, organisation_level == 0)
    }
}
