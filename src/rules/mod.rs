//! Ruleset data: terrain yields, improvements and cosmic constants

pub mod improvements;
pub mod loader;
pub mod terrain;

pub use improvements::{Improvement, ImprovementCatalog, ImprovementEffect, ImprovementType};
pub use loader::Ruleset;
pub use terrain::{Terrain, TerrainRules, TerrainTable};
