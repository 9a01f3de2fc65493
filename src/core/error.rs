use thiserror::Error;

use crate::core::types::{CityId, CivId, TilePos, UnitId};
use crate::rules::ImprovementType;

#[derive(Error, Debug)]
pub enum EconomyError {
    #[error("City not found: {0:?}")]
    CityNotFound(CityId),

    #[error("Civilization not found: {0:?}")]
    CivilizationNotFound(CivId),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("Too many civilizations: at most {0} are supported")]
    TooManyCivilizations(usize),

    #[error("Tile is off the map: {0:?}")]
    TileOffMap(TilePos),

    #[error("Tile {0:?} already hosts a city")]
    TileOccupied(TilePos),

    #[error("City {city:?} already has improvement {improvement:?}")]
    DuplicateImprovement {
        city: CityId,
        improvement: ImprovementType,
    },

    #[error("Invalid ruleset: {0}")]
    InvalidRuleset(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EconomyError>;
