//! Square tile map with optional east-west wraparound

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, CivId, TilePos, UnitId};
use crate::rules::terrain::Terrain;

/// Offsets of the 21-tile work radius, in the fixed order candidates are visited.
///
/// Centre first, then the inner ring clockwise from north, then the outer
/// ring clockwise from north. Tie-breaking in worker allocation depends on
/// this order.
pub const CITY_RADIUS: [(i32, i32); 21] = [
    (0, 0),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -2),
    (1, -2),
    (2, -1),
    (2, 0),
    (2, 1),
    (1, 2),
    (0, 2),
    (-1, 2),
    (-2, 1),
    (-2, 0),
    (-2, -1),
    (-1, -2),
];

/// Civilizations a tile's visibility mask can track
pub const MAX_CIVILIZATIONS: usize = u8::BITS as usize;

/// A single map tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub irrigation: bool,
    pub mine: bool,
    pub road: bool,
    pub railroad: bool,
    /// City holding the work claim on this tile; written only by the worker allocator
    pub worked_by: Option<CityId>,
    /// One bit per civilization, so at most [`MAX_CIVILIZATIONS`]
    pub visibility: u8,
    pub units_here: Vec<UnitId>,
    pub city_here: Option<CityId>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            irrigation: false,
            mine: false,
            road: false,
            railroad: false,
            worked_by: None,
            visibility: 0,
            units_here: Vec::new(),
            city_here: None,
        }
    }

    /// Ids past the mask are never visible
    pub fn is_visible_to(&self, civ: CivId) -> bool {
        self.visibility & visibility_bit(civ) != 0
    }

    pub fn reveal(&mut self, civ: CivId) {
        self.visibility |= visibility_bit(civ);
    }

    pub fn hide(&mut self, civ: CivId) {
        self.visibility &= !visibility_bit(civ);
    }
}

fn visibility_bit(civ: CivId) -> u8 {
    1u8.checked_shl(u32::from(civ.0)).unwrap_or(0)
}

/// The game map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    /// Flat maps do not wrap east-west
    pub flat_earth: bool,
    /// Multiplier applied to palace distance (larger maps stretch corruption)
    pub scale_factor: i32,
    tiles: Vec<Tile>,
}

impl Map {
    /// A round-world map filled with one terrain
    pub fn filled(width: i32, height: i32, terrain: Terrain) -> Self {
        let count = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            flat_earth: false,
            scale_factor: 1,
            tiles: vec![Tile::new(terrain); count],
        }
    }

    pub fn with_flat_earth(mut self, flat_earth: bool) -> Self {
        self.flat_earth = flat_earth;
        self
    }

    pub fn with_scale_factor(mut self, scale_factor: i32) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Canonical position for `pos`, wrapping x on round worlds
    pub fn normalize(&self, pos: TilePos) -> Option<TilePos> {
        if pos.y < 0 || pos.y >= self.height {
            return None;
        }
        if self.flat_earth {
            if pos.x < 0 || pos.x >= self.width {
                return None;
            }
            Some(pos)
        } else {
            Some(TilePos::new(pos.x.rem_euclid(self.width), pos.y))
        }
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        self.normalize(pos)
            .map(|p| (p.y * self.width + p.x) as usize)
    }

    pub fn tile(&self, pos: TilePos) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        self.index(pos).map(move |i| &mut self.tiles[i])
    }

    /// Iterate all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| TilePos::new(x, y)))
    }

    /// Make every tile visible to `civ`
    pub fn reveal_all(&mut self, civ: CivId) {
        for tile in &mut self.tiles {
            tile.reveal(civ);
        }
    }

    /// Distance between two tiles; a diagonal step costs 1.5
    ///
    /// On round worlds the shorter way around is used.
    pub fn distance(&self, a: TilePos, b: TilePos) -> f64 {
        let mut dx = (a.x - b.x).abs();
        if !self.flat_earth {
            dx = dx.min(self.width - dx);
        }
        let dy = (a.y - b.y).abs();
        let (long, short) = if dx >= dy { (dx, dy) } else { (dy, dx) };
        long as f64 + short as f64 / 2.0
    }

    /// On-map tiles of the work radius around `center`, in [`CITY_RADIUS`] order
    pub fn city_radius(&self, center: TilePos) -> Vec<TilePos> {
        let mut tiles = Vec::with_capacity(CITY_RADIUS.len());
        for (dx, dy) in CITY_RADIUS {
            if let Some(pos) = self.normalize(center.offset(dx, dy)) {
                // Narrow round maps can wrap onto the same tile twice
                if !tiles.contains(&pos) {
                    tiles.push(pos);
                }
            }
        }
        tiles
    }
}
