//! Unit Support Resolver: which supported units cost their city a shield

use tracing::debug;

use crate::core::config::CosmicRules;
use crate::core::error::{EconomyError, Result};
use crate::core::types::CityId;
use crate::entity::government::Government;
use crate::entity::unit::Unit;
use crate::simulation::game::Game;

/// Number of units a city supports without shield upkeep
pub fn free_support(size: i32, government: Government, cosmic: &CosmicRules) -> i32 {
    match government {
        // Only units beyond the city's size cost a shield
        Government::Anarchy | Government::Despotism => size,
        Government::Communism => cosmic.communism_pays_support,
        Government::Monarchy => cosmic.monarchy_pays_support,
        Government::Fundamentalism => cosmic.fundamentalism_pays_support,
        Government::Republic | Government::Democracy => 0,
    }
}

/// Set `needs_support` on each unit in order.
///
/// Every unit uses up one free slot whether or not it needed it, so a unit
/// that is exempt anyway still pushes later units towards upkeep.
pub fn resolve_support<'a>(
    free: i32,
    is_fundamentalism: bool,
    units: impl IntoIterator<Item = &'a mut Unit>,
) {
    let mut remaining = free;
    for unit in units {
        unit.needs_support = !unit.free_support(is_fundamentalism) && remaining <= 0;
        remaining -= 1;
    }
}

/// Resolve upkeep for every unit supported by `city_id` under its owner's government
pub fn set_unit_support(game: &mut Game, city_id: CityId) -> Result<()> {
    let city = game.city(city_id)?;
    let civ = game.civilization(city.owner)?;
    let (government, is_fundamentalism) = (civ.government, civ.is_fundamentalist());
    let free = free_support(city.size(), government, &game.rules.cosmic);
    let supported = city.supported_units.clone();

    if let Some(missing) = supported.iter().find(|id| id.index() >= game.units.len()) {
        return Err(EconomyError::UnitNotFound(*missing));
    }

    let mut ordered: Vec<&mut Unit> = game
        .units
        .iter_mut()
        .filter(|unit| supported.contains(&unit.id))
        .collect();
    ordered.sort_by_key(|unit| supported.iter().position(|id| *id == unit.id));
    resolve_support(free, is_fundamentalism, ordered);
    debug!(city = ?city_id, ?government, free, units = supported.len(), "resolved unit support");
    Ok(())
}
