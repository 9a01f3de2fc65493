//! Map tiles, distances and tile yields

pub mod map;
pub mod tile_yield;

pub use map::{Map, Tile, CITY_RADIUS, MAX_CIVILIZATIONS};
pub use tile_yield::{RatedTile, TileYield};
