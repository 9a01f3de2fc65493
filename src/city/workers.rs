//! Worker Allocation Engine: which tiles a city works
//!
//! The allocator is the only writer of `Tile::worked_by` and
//! `City::worked_tiles`, and keeps the two sides of that relation in step.

use tracing::{debug, warn};

use crate::city::state::City;
use crate::core::types::{CivId, CityId, TilePos};
use crate::entity::unit::Unit;
use crate::rules::terrain::TerrainTable;
use crate::world::map::{Map, Tile};
use crate::world::tile_yield::{RatedTile, TileYield};

/// Value of a worked tile when deciding which one to give up
fn release_score(tile: &impl TileYield, organisation_level: u8) -> i32 {
    let low = organisation_level == 0;
    tile.food(low) + tile.shields(low) + tile.trade(organisation_level)
}

/// Value of a candidate tile when adding workers; food is favoured
fn claim_score(tile: &impl TileYield, organisation_level: u8) -> f64 {
    let low = organisation_level == 0;
    1.5 * tile.food(low) as f64 + tile.shields(low) as f64 + 0.5 * tile.trade(organisation_level) as f64
}

/// Whether something on the tile stops `owner`'s city `city` from working it
fn is_blocked(tile: &Tile, city: CityId, owner: CivId, units: &[Unit]) -> bool {
    if !tile.is_visible_to(owner) {
        return true;
    }
    if tile.city_here.is_some_and(|c| c != city) {
        return true;
    }
    tile.units_here
        .iter()
        .filter_map(|id| units.get(id.index()))
        .any(|unit| unit.is_hostile_to(owner))
}

fn worked_tile<'a>(map: &'a Map, city: &City, pos: TilePos) -> &'a Tile {
    map.tile(pos).unwrap_or_else(|| {
        panic!("city {:?} ({}) works off-map tile {:?}", city.id, city.name, pos)
    })
}

/// Stop working the least valuable non-centre tile.
///
/// Ties go to the tile that appears first in `worked_tiles`. Panics if the
/// city works nothing besides its centre.
pub fn shrink_selection(city: &mut City, map: &mut Map, terrain: &TerrainTable) -> TilePos {
    let organisation = city.organization_level;

    let mut lowest: Option<(TilePos, i32)> = None;
    for &pos in &city.worked_tiles {
        if pos == city.location {
            continue;
        }
        let tile = worked_tile(map, city, pos);
        let score = release_score(&RatedTile::new(tile, terrain), organisation);
        if lowest.map_or(true, |(_, best)| score < best) {
            lowest = Some((pos, score));
        }
    }

    let Some((released, score)) = lowest else {
        panic!(
            "city {:?} ({}) has no worked tile besides its centre to release",
            city.id, city.name
        );
    };

    city.worked_tiles.retain(|p| *p != released);
    if let Some(tile) = map.tile_mut(released) {
        tile.worked_by = None;
    }
    debug!(city = %city.name, ?released, score, "released worked tile");
    released
}

/// Put new workers on the best free tiles until the city works `size + 1` tiles.
///
/// Candidates are visited in city-radius order and kept in a ranked list of
/// at most `size + 1 - worked` entries, highest score first. A candidate
/// scoring equal to an entry already in the list goes after it, so earlier
/// tiles win ties. Returns the newly claimed tiles in rank order.
pub fn grow_selection(
    city: &mut City,
    map: &mut Map,
    terrain: &TerrainTable,
    units: &[Unit],
) -> Vec<TilePos> {
    let wanted = city.size + 1 - city.worked_tiles.len() as i32;
    if wanted <= 0 {
        return Vec::new();
    }
    let capacity = wanted as usize;
    let organisation = city.organization_level;

    let mut ranked: Vec<(TilePos, f64)> = Vec::with_capacity(capacity + 1);
    for pos in map.city_radius(city.location) {
        let Some(tile) = map.tile(pos) else {
            continue;
        };
        if tile.worked_by.is_some() || is_blocked(tile, city.id, city.owner, units) {
            continue;
        }

        let score = claim_score(&RatedTile::new(tile, terrain), organisation);
        let slot = ranked
            .iter()
            .position(|(_, ranked_score)| *ranked_score < score)
            .unwrap_or(ranked.len());
        if slot >= capacity {
            continue;
        }
        ranked.insert(slot, (pos, score));
        ranked.truncate(capacity);
    }

    if ranked.is_empty() {
        warn!(city = %city.name, wanted, "no workable tiles left in city radius");
    }

    let claimed: Vec<TilePos> = ranked.into_iter().map(|(pos, _)| pos).collect();
    for &pos in &claimed {
        if let Some(tile) = map.tile_mut(pos) {
            tile.worked_by = Some(city.id);
        }
        city.worked_tiles.push(pos);
    }
    debug!(city = %city.name, claimed = claimed.len(), wanted, "assigned workers");
    claimed
}

/// Drop the work claim on tiles the city can no longer use.
///
/// A tile is given up when it is hidden from the owner, hosts another city,
/// holds a hostile armed unit, or has been claimed by a different city. The
/// centre tile is never released. Returns the released tiles.
pub fn release_unworkable_tiles(city: &mut City, map: &mut Map, units: &[Unit]) -> Vec<TilePos> {
    let mut released = Vec::new();
    for &pos in &city.worked_tiles {
        if pos == city.location {
            continue;
        }
        let tile = worked_tile(map, city, pos);
        let lost_claim = tile.worked_by != Some(city.id);
        if lost_claim || is_blocked(tile, city.id, city.owner, units) {
            released.push((pos, lost_claim));
        }
    }

    for &(pos, lost_claim) in &released {
        city.worked_tiles.retain(|p| *p != pos);
        if !lost_claim {
            if let Some(tile) = map.tile_mut(pos) {
                tile.worked_by = None;
            }
        }
        debug!(city = %city.name, ?pos, "tile became unworkable");
    }
    released.into_iter().map(|(pos, _)| pos).collect()
}
