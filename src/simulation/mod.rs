//! Game container and the notifications it emits

pub mod events;
pub mod game;

pub use events::MapEvent;
pub use game::{Game, DEFAULT_MAX_DISTANCE};
