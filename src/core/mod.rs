pub mod config;
pub mod error;
pub mod types;

pub use config::CosmicRules;
pub use error::{EconomyError, Result};
pub use types::{CityId, CivId, TilePos, Turn, UnitId};
