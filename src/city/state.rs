//! City state
//!
//! `City` only stores state. Everything that changes it lives in the sibling
//! service modules (`workers`, `output`, `support`, `storage`, `growth`,
//! `improvements`); `size`, `worked_tiles` and `improvements` can only be
//! written from inside the crate.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, CivId, TilePos, UnitId};
use crate::rules::improvements::{Improvement, ImprovementEffect, ImprovementType};

/// A city and its most recently computed economy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub(crate) size: i32,
    pub location: TilePos,
    pub owner: CivId,
    /// Worked tiles; the centre tile is always first
    pub(crate) worked_tiles: Vec<TilePos>,
    pub supported_units: Vec<UnitId>,
    pub(crate) improvements: AHashMap<ImprovementType, Improvement>,
    pub organization_level: u8,

    // Derived by the output calculator, overwritten on every recalculation
    pub total_production: i32,
    pub production: i32,
    pub trade: i32,
    pub corruption: i32,
    pub waste: i32,
    pub support: i32,
    pub food_production: i32,
    pub food_consumption: i32,
    pub surplus_hunger: i32,

    pub food_in_storage: i32,
    pub improvement_sold: bool,
    pub we_love_king_day: bool,
}

impl City {
    /// A size-1 city working only its centre tile
    pub fn new(id: CityId, name: impl Into<String>, owner: CivId, location: TilePos) -> Self {
        Self {
            id,
            name: name.into(),
            size: 1,
            location,
            owner,
            worked_tiles: vec![location],
            supported_units: Vec::new(),
            improvements: AHashMap::new(),
            organization_level: 0,
            total_production: 0,
            production: 0,
            trade: 0,
            corruption: 0,
            waste: 0,
            support: 0,
            food_production: 0,
            food_consumption: 0,
            surplus_hunger: 0,
            food_in_storage: 0,
            improvement_sold: false,
            we_love_king_day: false,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn worked_tiles(&self) -> &[TilePos] {
        &self.worked_tiles
    }

    pub fn improvements(&self) -> impl Iterator<Item = &Improvement> {
        self.improvements.values()
    }

    pub fn improvement_exists(&self, kind: ImprovementType) -> bool {
        self.improvements.contains_key(&kind)
    }

    /// Whether any improvement in the city carries `effect`
    pub fn has_effect(&self, effect: ImprovementEffect) -> bool {
        self.improvements.values().any(|i| i.has_effect(effect))
    }

    /// Food needed to fill the food box at the current size
    pub fn food_box_capacity(&self, food_rows: i32) -> i32 {
        (self.size + 1) * food_rows
    }

    /// Panics when the worked-tile set cannot have come from the allocator
    pub(crate) fn assert_worked_tiles_consistent(&self) {
        assert!(
            self.worked_tiles.contains(&self.location),
            "city {:?} ({}) is not working its centre tile",
            self.id,
            self.name
        );
        assert!(
            self.worked_tiles.len() <= (self.size + 1) as usize,
            "city {:?} ({}) works {} tiles at size {}",
            self.id,
            self.name,
            self.worked_tiles.len(),
            self.size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> City {
        City::new(CityId(0), "Babylon", CivId(1), TilePos::new(5, 5))
    }

    #[test]
    fn test_new_city_works_centre() {
        let city = city();
        assert_eq!(city.size(), 1);
        assert_eq!(city.worked_tiles(), &[TilePos::new(5, 5)]);
        city.assert_worked_tiles_consistent();
    }

    #[test]
    fn test_effect_queries() {
        let mut city = city();
        assert!(!city.has_effect(ImprovementEffect::Capital));
        city.improvements.insert(
            ImprovementType::Palace,
            Improvement::new(ImprovementType::Palace).with_effect(ImprovementEffect::Capital, 1),
        );
        assert!(city.has_effect(ImprovementEffect::Capital));
        assert!(city.improvement_exists(ImprovementType::Palace));
        assert!(!city.improvement_exists(ImprovementType::Courthouse));
    }

    #[test]
    fn test_food_box_capacity() {
        let mut city = city();
        city.size = 4;
        assert_eq!(city.food_box_capacity(10), 50);
    }

    #[test]
    #[should_panic(expected = "works 4 tiles at size 2")]
    fn test_too_many_worked_tiles_panics() {
        let mut city = city();
        city.size = 2;
        city.worked_tiles.extend([TilePos::new(5, 4), TilePos::new(6, 5), TilePos::new(4, 5)]);
        city.assert_worked_tiles_consistent();
    }

    #[test]
    #[should_panic(expected = "not working its centre tile")]
    fn test_missing_centre_panics() {
        let mut city = city();
        city.worked_tiles.clear();
        city.assert_worked_tiles_consistent();
    }
}
