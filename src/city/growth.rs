//! Growth and shrink orchestration
//!
//! `grow_city` and `shrink_city` are the only ways a city's size changes.
//! Each one reallocates workers, recalculates output and asks the map layer
//! to redraw the city tile.

use tracing::debug;

use crate::city::output::calculate_output;
use crate::city::state::City;
use crate::city::support::set_unit_support;
use crate::city::workers::{grow_selection, release_unworkable_tiles, shrink_selection};
use crate::core::error::{EconomyError, Result};
use crate::core::types::{CityId, CivId, TilePos};
use crate::simulation::events::MapEvent;
use crate::simulation::game::Game;

/// Store the organisation level implied by the owner's government
pub fn refresh_organization_level(game: &mut Game, city_id: CityId) -> Result<()> {
    let government = game.government_of_city(city_id)?;
    let city = game.city_mut(city_id)?;
    city.organization_level = government.organization_level(city.we_love_king_day);
    Ok(())
}

fn notify_city_tile(game: &mut Game, city_id: CityId) -> Result<()> {
    let location = game.city(city_id)?.location;
    game.trigger_map_event(MapEvent::UpdateMap {
        tiles: vec![location],
    });
    Ok(())
}

/// Add one citizen and put them to work
pub fn grow_city(game: &mut Game, city_id: CityId) -> Result<()> {
    let government = game.government_of_city(city_id)?;
    refresh_organization_level(game, city_id)?;

    let Game {
        map,
        rules,
        cities,
        units,
        ..
    } = game;
    let city = cities
        .get_mut(city_id.index())
        .ok_or(EconomyError::CityNotFound(city_id))?;
    city.size += 1;
    grow_selection(city, map, &rules.terrain, units);
    debug!(city = %city.name, size = city.size, "city grew");

    calculate_output(game, city_id, government)?;
    notify_city_tile(game, city_id)
}

/// Remove one citizen and, if the city then works more than `size + 1`
/// tiles, the least valuable one.
///
/// Panics if the city is already size 1.
pub fn shrink_city(game: &mut Game, city_id: CityId) -> Result<()> {
    let government = game.government_of_city(city_id)?;
    refresh_organization_level(game, city_id)?;

    let Game {
        map, rules, cities, ..
    } = game;
    let city = cities
        .get_mut(city_id.index())
        .ok_or(EconomyError::CityNotFound(city_id))?;
    assert!(
        city.size > 1,
        "city {:?} ({}) cannot shrink below size 1",
        city.id,
        city.name
    );
    city.size -= 1;
    // A city short of workable tiles may already work fewer than size + 1
    while city.worked_tiles.len() > (city.size + 1) as usize {
        shrink_selection(city, map, &rules.terrain);
    }
    debug!(city = %city.name, size = city.size, "city shrank");

    calculate_output(game, city_id, government)?;
    notify_city_tile(game, city_id)
}

/// Found a size-1 city on `location`, work its best tile and compute its economy
pub fn found_city(
    game: &mut Game,
    owner: CivId,
    name: impl Into<String>,
    location: TilePos,
) -> Result<CityId> {
    game.civilization(owner)?;
    let id = CityId(game.cities.len() as u32);

    let tile = game
        .map
        .tile_mut(location)
        .ok_or(EconomyError::TileOffMap(location))?;
    if tile.city_here.is_some() {
        return Err(EconomyError::TileOccupied(location));
    }
    tile.city_here = Some(id);
    tile.worked_by = Some(id);
    tile.reveal(owner);

    let city = City::new(id, name, owner, location);
    debug!(city = %city.name, ?location, "city founded");
    game.cities.push(city);

    refresh_organization_level(game, id)?;
    let Game {
        map,
        rules,
        cities,
        units,
        ..
    } = game;
    grow_selection(&mut cities[id.index()], map, &rules.terrain, units);

    set_unit_support(game, id)?;
    let government = game.government_of(owner)?;
    calculate_output(game, id, government)?;
    notify_city_tile(game, id)?;
    Ok(id)
}

/// Give up tiles the city can no longer work, refill from free tiles and recalculate
pub fn reassign_workers(game: &mut Game, city_id: CityId) -> Result<Vec<TilePos>> {
    let government = game.government_of_city(city_id)?;
    refresh_organization_level(game, city_id)?;

    let Game {
        map,
        rules,
        cities,
        units,
        ..
    } = game;
    let city = cities
        .get_mut(city_id.index())
        .ok_or(EconomyError::CityNotFound(city_id))?;
    let released = release_unworkable_tiles(city, map, units);
    if released.is_empty() {
        return Ok(released);
    }
    grow_selection(city, map, &rules.terrain, units);

    calculate_output(game, city_id, government)?;
    let mut tiles = released.clone();
    tiles.push(game.city(city_id)?.location);
    game.trigger_map_event(MapEvent::UpdateMap { tiles });
    Ok(released)
}
