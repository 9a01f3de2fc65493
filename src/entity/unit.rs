//! Units as seen by the city economy: upkeep, food and threat

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, CivId, TilePos, UnitId};

/// Role the AI assigns a unit type; `Settle` units eat food from their home city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiRole {
    Attack,
    Defend,
    NavalSuperiority,
    AirSuperiority,
    SeaTransport,
    Settle,
    Diplomacy,
    Trade,
}

/// A unit on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub owner: CivId,
    pub role: AiRole,
    /// Attack strength; zero for non-combat units
    pub attack: u32,
    /// Exempt from shield upkeep under Fundamentalism (fanatics)
    pub free_under_fundamentalism: bool,
    pub home_city: Option<CityId>,
    pub location: TilePos,
    /// Whether the home city pays a shield for this unit; set by the support resolver
    pub needs_support: bool,
}

impl Unit {
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        owner: CivId,
        role: AiRole,
        location: TilePos,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            role,
            attack: 0,
            free_under_fundamentalism: false,
            home_city: None,
            location,
            needs_support: false,
        }
    }

    pub fn with_attack(mut self, attack: u32) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_fundamentalism_exemption(mut self) -> Self {
        self.free_under_fundamentalism = true;
        self
    }

    /// Whether this unit costs no upkeep regardless of the free-support count
    pub fn free_support(&self, is_fundamentalism: bool) -> bool {
        is_fundamentalism && self.free_under_fundamentalism
    }

    /// A unit blocks a tile for `civ` when it belongs to someone else and can attack
    pub fn is_hostile_to(&self, civ: CivId) -> bool {
        self.owner != civ && self.attack > 0
    }

    pub fn is_settler(&self) -> bool {
        self.role == AiRole::Settle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(owner: u8) -> Unit {
        Unit::new(UnitId(0), "Warriors", CivId(owner), AiRole::Attack, TilePos::new(0, 0))
    }

    #[test]
    fn test_free_support_only_under_fundamentalism() {
        let fanatic = unit(1).with_fundamentalism_exemption();
        assert!(fanatic.free_support(true));
        assert!(!fanatic.free_support(false));
        assert!(!unit(1).free_support(true));
    }

    #[test]
    fn test_hostility_requires_attack() {
        let foreign = unit(2);
        assert!(!foreign.is_hostile_to(CivId(1)), "zero attack never blocks");

        let armed = unit(2).with_attack(1);
        assert!(armed.is_hostile_to(CivId(1)));
        assert!(!armed.is_hostile_to(CivId(2)), "own units never block");
    }
}
