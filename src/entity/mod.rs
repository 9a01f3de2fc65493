//! Civilizations, governments and units

pub mod civilization;
pub mod government;
pub mod unit;

pub use civilization::Civilization;
pub use government::{Difficulty, Government};
pub use unit::{AiRole, Unit};
