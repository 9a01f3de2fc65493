//! Game container: the map, ruleset and every civilization, city and unit

use tracing::debug;

use crate::city::state::City;
use crate::core::error::{EconomyError, Result};
use crate::core::types::{CityId, CivId, Turn, UnitId};
use crate::entity::civilization::Civilization;
use crate::entity::government::{Difficulty, Government};
use crate::entity::unit::Unit;
use crate::rules::loader::Ruleset;
use crate::simulation::events::MapEvent;
use crate::world::map::{Map, MAX_CIVILIZATIONS};

/// Palace distance assumed for civilizations without a capital.
///
/// Large enough to saturate both the corruption (32) and waste (16) caps.
pub const DEFAULT_MAX_DISTANCE: f64 = 32.0;

#[derive(Debug, Clone)]
pub struct Game {
    pub map: Map,
    pub rules: Ruleset,
    pub difficulty: Difficulty,
    /// Palace distance used when the owner holds no capital
    pub max_distance: f64,
    pub turn: Turn,
    pub civilizations: Vec<Civilization>,
    pub cities: Vec<City>,
    pub units: Vec<Unit>,
    events: Vec<MapEvent>,
}

impl Game {
    pub fn new(map: Map, rules: Ruleset) -> Self {
        Self {
            map,
            rules,
            difficulty: Difficulty::default(),
            max_distance: DEFAULT_MAX_DISTANCE,
            turn: 0,
            civilizations: Vec::new(),
            cities: Vec::new(),
            units: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Register a civilization; fails once every visibility bit is taken
    pub fn add_civilization(
        &mut self,
        name: impl Into<String>,
        government: Government,
    ) -> Result<CivId> {
        let index = self.civilizations.len();
        if index >= MAX_CIVILIZATIONS {
            return Err(EconomyError::TooManyCivilizations(MAX_CIVILIZATIONS));
        }
        let id = CivId(index as u8);
        self.civilizations.push(Civilization::new(id, name, government));
        Ok(id)
    }

    pub fn civilization(&self, id: CivId) -> Result<&Civilization> {
        self.civilizations
            .get(id.index())
            .ok_or(EconomyError::CivilizationNotFound(id))
    }

    pub fn government_of(&self, id: CivId) -> Result<Government> {
        self.civilization(id).map(|c| c.government)
    }

    pub fn set_government(&mut self, id: CivId, government: Government) -> Result<()> {
        let civ = self
            .civilizations
            .get_mut(id.index())
            .ok_or(EconomyError::CivilizationNotFound(id))?;
        debug!(civ = %civ.name, ?government, "government changed");
        civ.government = government;
        Ok(())
    }

    pub fn city(&self, id: CityId) -> Result<&City> {
        self.cities.get(id.index()).ok_or(EconomyError::CityNotFound(id))
    }

    pub fn city_mut(&mut self, id: CityId) -> Result<&mut City> {
        self.cities
            .get_mut(id.index())
            .ok_or(EconomyError::CityNotFound(id))
    }

    /// Government of the civilization owning `city`
    pub fn government_of_city(&self, city: CityId) -> Result<Government> {
        let owner = self.city(city)?.owner;
        self.government_of(owner)
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(id.index()).ok_or(EconomyError::UnitNotFound(id))
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit> {
        self.units
            .get_mut(id.index())
            .ok_or(EconomyError::UnitNotFound(id))
    }

    /// Place a unit on the map, assigning its id.
    ///
    /// A unit with a home city joins the end of that city's support list.
    pub fn spawn_unit(&mut self, mut unit: Unit) -> Result<UnitId> {
        let id = UnitId(self.units.len() as u32);
        unit.id = id;

        if let Some(home) = unit.home_city {
            self.city(home)?;
        }
        let tile = self
            .map
            .tile_mut(unit.location)
            .ok_or(EconomyError::TileOffMap(unit.location))?;
        tile.units_here.push(id);

        if let Some(home) = unit.home_city {
            self.city_mut(home)?.supported_units.push(id);
        }
        self.units.push(unit);
        Ok(id)
    }

    /// Rehome a unit; it is appended to the new city's support list
    pub fn set_home_city(&mut self, unit: UnitId, city: CityId) -> Result<()> {
        self.city(city)?;
        let previous = self.unit(unit)?.home_city;
        if let Some(old) = previous {
            self.city_mut(old)?.supported_units.retain(|u| *u != unit);
        }
        self.unit_mut(unit)?.home_city = Some(city);
        self.city_mut(city)?.supported_units.push(unit);
        Ok(())
    }

    /// Start a new turn: every city may sell an improvement again
    pub fn begin_turn(&mut self) {
        self.turn += 1;
        for city in &mut self.cities {
            city.improvement_sold = false;
        }
        debug!(turn = self.turn, "turn started");
    }

    pub fn trigger_map_event(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    /// Hand queued map events to the rendering layer
    pub fn drain_map_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TilePos;
    use crate::entity::unit::AiRole;
    use crate::rules::terrain::Terrain;

    fn game() -> Game {
        Game::new(Map::filled(10, 10, Terrain::Grassland), Ruleset::with_defaults())
    }

    #[test]
    fn test_civilization_ids_are_sequential() {
        let mut game = game();
        let a = game.add_civilization("Romans", Government::Despotism).unwrap();
        let b = game.add_civilization("Greeks", Government::Monarchy).unwrap();
        assert_eq!(a, CivId(0));
        assert_eq!(b, CivId(1));
        assert_eq!(game.government_of(b).unwrap(), Government::Monarchy);
        assert!(matches!(
            game.government_of(CivId(9)),
            Err(EconomyError::CivilizationNotFound(_))
        ));
    }

    #[test]
    fn test_spawn_unit_registers_on_tile() {
        let mut game = game();
        let civ = game.add_civilization("Romans", Government::Despotism).unwrap();
        let pos = TilePos::new(3, 3);
        let id = game
            .spawn_unit(Unit::new(UnitId(99), "Warriors", civ, AiRole::Attack, pos))
            .unwrap();
        assert_eq!(id, UnitId(0));
        assert_eq!(game.unit(id).unwrap().id, id);
        assert_eq!(game.map.tile(pos).unwrap().units_here, vec![id]);
    }

    #[test]
    fn test_spawn_unit_off_map_fails() {
        let mut game = game();
        let civ = game.add_civilization("Romans", Government::Despotism).unwrap();
        let result = game.spawn_unit(Unit::new(
            UnitId(0),
            "Trireme",
            civ,
            AiRole::SeaTransport,
            TilePos::new(0, 12),
        ));
        assert!(matches!(result, Err(EconomyError::TileOffMap(_))));
        assert!(game.units.is_empty());
    }

    #[test]
    fn test_drain_map_events() {
        let mut game = game();
        game.trigger_map_event(MapEvent::UpdateMap {
            tiles: vec![TilePos::new(1, 1)],
        });
        assert_eq!(game.drain_map_events().len(), 1);
        assert!(game.drain_map_events().is_empty());
    }

    #[test]
    fn test_civilization_limit() {
        let mut game = game();
        for i in 0..MAX_CIVILIZATIONS {
            let id = game.add_civilization(format!("Civ {}", i), Government::Despotism).unwrap();
            game.map.reveal_all(id);
        }
        assert!(matches!(
            game.add_civilization("Latecomers", Government::Despotism),
            Err(EconomyError::TooManyCivilizations(8))
        ));
        assert_eq!(game.civilizations.len(), MAX_CIVILIZATIONS);

        let last = CivId((MAX_CIVILIZATIONS - 1) as u8);
        assert!(game.map.tile(TilePos::new(0, 0)).unwrap().is_visible_to(last));
    }
}
