//! Notifications for the rendering layer

use serde::{Deserialize, Serialize};

use crate::core::types::TilePos;

/// Something on the map changed and must be redrawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Tiles whose visuals are stale
    UpdateMap { tiles: Vec<TilePos> },
}
