//! City improvements and the effects they carry

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Kind of city improvement; a city holds at most one of each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImprovementType {
    Palace,
    Barracks,
    Granary,
    Temple,
    Marketplace,
    Library,
    Courthouse,
    CityWalls,
    Aqueduct,
    Bank,
    Cathedral,
    University,
    MassTransit,
    Colosseum,
    Factory,
    ManufacturingPlant,
    SdiDefense,
    RecyclingCenter,
    PowerPlant,
    HydroPlant,
    NuclearPlant,
    StockExchange,
    SewerSystem,
    Supermarket,
    Superhighways,
    ResearchLab,
    SamMissileBattery,
    CoastalFortress,
    SolarPlant,
    Harbour,
    OffshorePlatform,
    Airport,
    PoliceStation,
    PortFacility,
}

impl ImprovementType {
    pub const ALL: [ImprovementType; 34] = [
        ImprovementType::Palace,
        ImprovementType::Barracks,
        ImprovementType::Granary,
        ImprovementType::Temple,
        ImprovementType::Marketplace,
        ImprovementType::Library,
        ImprovementType::Courthouse,
        ImprovementType::CityWalls,
        ImprovementType::Aqueduct,
        ImprovementType::Bank,
        ImprovementType::Cathedral,
        ImprovementType::University,
        ImprovementType::MassTransit,
        ImprovementType::Colosseum,
        ImprovementType::Factory,
        ImprovementType::ManufacturingPlant,
        ImprovementType::SdiDefense,
        ImprovementType::RecyclingCenter,
        ImprovementType::PowerPlant,
        ImprovementType::HydroPlant,
        ImprovementType::NuclearPlant,
        ImprovementType::StockExchange,
        ImprovementType::SewerSystem,
        ImprovementType::Supermarket,
        ImprovementType::Superhighways,
        ImprovementType::ResearchLab,
        ImprovementType::SamMissileBattery,
        ImprovementType::CoastalFortress,
        ImprovementType::SolarPlant,
        ImprovementType::Harbour,
        ImprovementType::OffshorePlatform,
        ImprovementType::Airport,
        ImprovementType::PoliceStation,
        ImprovementType::PortFacility,
    ];

    /// Display name used in the default catalog
    pub fn display_name(self) -> &'static str {
        match self {
            ImprovementType::Palace => "Palace",
            ImprovementType::Barracks => "Barracks",
            ImprovementType::Granary => "Granary",
            ImprovementType::Temple => "Temple",
            ImprovementType::Marketplace => "Marketplace",
            ImprovementType::Library => "Library",
            ImprovementType::Courthouse => "Courthouse",
            ImprovementType::CityWalls => "City Walls",
            ImprovementType::Aqueduct => "Aqueduct",
            ImprovementType::Bank => "Bank",
            ImprovementType::Cathedral => "Cathedral",
            ImprovementType::University => "University",
            ImprovementType::MassTransit => "Mass Transit",
            ImprovementType::Colosseum => "Colosseum",
            ImprovementType::Factory => "Factory",
            ImprovementType::ManufacturingPlant => "Mfg. Plant",
            ImprovementType::SdiDefense => "SDI Defense",
            ImprovementType::RecyclingCenter => "Recycling Center",
            ImprovementType::PowerPlant => "Power Plant",
            ImprovementType::HydroPlant => "Hydro Plant",
            ImprovementType::NuclearPlant => "Nuclear Plant",
            ImprovementType::StockExchange => "Stock Exchange",
            ImprovementType::SewerSystem => "Sewer System",
            ImprovementType::Supermarket => "Supermarket",
            ImprovementType::Superhighways => "Superhighways",
            ImprovementType::ResearchLab => "Research Lab",
            ImprovementType::SamMissileBattery => "SAM Missile Battery",
            ImprovementType::CoastalFortress => "Coastal Fortress",
            ImprovementType::SolarPlant => "Solar Plant",
            ImprovementType::Harbour => "Harbour",
            ImprovementType::OffshorePlatform => "Offshore Platform",
            ImprovementType::Airport => "Airport",
            ImprovementType::PoliceStation => "Police Station",
            ImprovementType::PortFacility => "Port Facility",
        }
    }

    /// Parse a ruleset key such as `"city_walls"` or `"City Walls"`
    pub fn from_name(name: &str) -> Option<ImprovementType> {
        let key = normalize(name);
        Self::ALL
            .into_iter()
            .find(|kind| normalize(kind.display_name()) == key || normalize(&format!("{:?}", kind)) == key)
    }
}

/// Effect an improvement has on its city; the magnitude lives in [`Improvement::effects`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImprovementEffect {
    /// Seat of government; corruption and waste are measured from here
    Capital,
    Walled,
    /// Percentage of the food box kept when the city changes size
    FoodStorage,
    CoastalDefense,
    Happiness,
}

impl ImprovementEffect {
    pub fn from_name(name: &str) -> Option<ImprovementEffect> {
        let effect = match normalize(name).as_str() {
            "capital" => ImprovementEffect::Capital,
            "walled" => ImprovementEffect::Walled,
            "foodstorage" => ImprovementEffect::FoodStorage,
            "coastaldefense" => ImprovementEffect::CoastalDefense,
            "happiness" => ImprovementEffect::Happiness,
            _ => return None,
        };
        Some(effect)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// An improvement instance held by a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub kind: ImprovementType,
    pub name: String,
    pub effects: AHashMap<ImprovementEffect, i32>,
}

impl Improvement {
    pub fn new(kind: ImprovementType) -> Self {
        Self {
            kind,
            name: kind.display_name().into(),
            effects: AHashMap::new(),
        }
    }

    pub fn with_effect(mut self, effect: ImprovementEffect, magnitude: i32) -> Self {
        self.effects.insert(effect, magnitude);
        self
    }

    pub fn has_effect(&self, effect: ImprovementEffect) -> bool {
        self.effects.contains_key(&effect)
    }

    pub fn effect(&self, effect: ImprovementEffect) -> Option<i32> {
        self.effects.get(&effect).copied()
    }
}

/// Catalog of improvement definitions
#[derive(Debug, Clone, Default)]
pub struct ImprovementCatalog {
    improvements: Vec<Improvement>,
}

impl ImprovementCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classic ruleset improvements with their economy-relevant effects
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for kind in ImprovementType::ALL {
            let improvement = match kind {
                ImprovementType::Palace => {
                    Improvement::new(kind).with_effect(ImprovementEffect::Capital, 1)
                }
                ImprovementType::Granary => {
                    Improvement::new(kind).with_effect(ImprovementEffect::FoodStorage, 50)
                }
                ImprovementType::CityWalls => {
                    Improvement::new(kind).with_effect(ImprovementEffect::Walled, 1)
                }
                ImprovementType::CoastalFortress => {
                    Improvement::new(kind).with_effect(ImprovementEffect::CoastalDefense, 1)
                }
                ImprovementType::Temple => {
                    Improvement::new(kind).with_effect(ImprovementEffect::Happiness, 2)
                }
                ImprovementType::Colosseum => {
                    Improvement::new(kind).with_effect(ImprovementEffect::Happiness, 3)
                }
                ImprovementType::Cathedral => {
                    Improvement::new(kind).with_effect(ImprovementEffect::Happiness, 3)
                }
                ImprovementType::Barracks
                | ImprovementType::Marketplace
                | ImprovementType::Library
                | ImprovementType::Courthouse
                | ImprovementType::Aqueduct
                | ImprovementType::Bank
                | ImprovementType::University
                | ImprovementType::MassTransit
                | ImprovementType::Factory
                | ImprovementType::ManufacturingPlant
                | ImprovementType::SdiDefense
                | ImprovementType::RecyclingCenter
                | ImprovementType::PowerPlant
                | ImprovementType::HydroPlant
                | ImprovementType::NuclearPlant
                | ImprovementType::StockExchange
                | ImprovementType::SewerSystem
                | ImprovementType::Supermarket
                | ImprovementType::Superhighways
                | ImprovementType::ResearchLab
                | ImprovementType::SamMissileBattery
                | ImprovementType::SolarPlant
                | ImprovementType::Harbour
                | ImprovementType::OffshorePlatform
                | ImprovementType::Airport
                | ImprovementType::PoliceStation
                | ImprovementType::PortFacility => Improvement::new(kind),
            };
            catalog.add(improvement);
        }
        catalog
    }

    /// Add a definition, replacing any existing one of the same kind
    pub fn add(&mut self, improvement: Improvement) {
        match self.improvements.iter_mut().find(|i| i.kind == improvement.kind) {
            Some(existing) => *existing = improvement,
            None => self.improvements.push(improvement),
        }
    }

    pub fn get(&self, kind: ImprovementType) -> Option<&Improvement> {
        self.improvements.iter().find(|i| i.kind == kind)
    }

    /// A fresh instance of `kind`, ready to be added to a city
    pub fn instantiate(&self, kind: ImprovementType) -> Improvement {
        self.get(kind).cloned().unwrap_or_else(|| Improvement::new(kind))
    }

    pub fn all(&self) -> &[Improvement] {
        &self.improvements
    }
}
