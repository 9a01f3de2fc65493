//! City Output Calculator
//!
//! Sums the yields of the worked tiles, then takes unit support, waste and
//! corruption off the top. Waste and corruption grow with the distance to the
//! nearest capital and shrink with better governments:
//!
//! ```text
//! corruption = trade              * min(distance, 32) * 15 / (4 + gov)     / 100
//! waste      = (shields - support) * min(distance, 16) * 15 / (4 + 4 * gov) / 100
//! ```
//!
//! Both are halved by a Courthouse and truncated to whole points.

use tracing::debug;

use crate::city::growth::refresh_organization_level;
use crate::city::state::City;
use crate::core::error::{EconomyError, Result};
use crate::core::types::CityId;
use crate::entity::government::Government;
use crate::rules::improvements::{ImprovementEffect, ImprovementType};
use crate::simulation::game::Game;
use crate::world::tile_yield::{RatedTile, TileYield};

/// Distance at which corruption stops increasing
const CORRUPTION_DISTANCE_CAP: f64 = 32.0;
/// Distance at which waste stops increasing
const WASTE_DISTANCE_CAP: f64 = 16.0;

/// Raw yields of a city's worked tiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileTotals {
    pub food: i32,
    pub shields: i32,
    pub trade: i32,
}

/// Effective palace distance for corruption and waste; 0 means none
pub fn distance_factor(game: &Game, city: &City, government: Government) -> f64 {
    if city.has_effect(ImprovementEffect::Capital)
        || matches!(government, Government::Democracy | Government::Fundamentalism)
    {
        return 0.0;
    }
    if government == Government::Communism {
        return game.rules.cosmic.communism_equivalent_palace_distance as f64;
    }

    let nearest_capital = game
        .cities
        .iter()
        .filter(|c| c.owner == city.owner && c.has_effect(ImprovementEffect::Capital))
        .map(|c| game.map.distance(c.location, city.location))
        .reduce(f64::min);

    let mut distance = nearest_capital.unwrap_or(game.max_distance);
    if government < Government::Monarchy {
        distance += game.difficulty.value() as f64;
    }
    distance
}

/// Corruption and waste for the given totals, before flooring
fn losses(
    city: &City,
    government: Government,
    distance: f64,
    scale_factor: i32,
    trade: i32,
    shields_after_support: i32,
) -> (i32, i32) {
    if distance <= 0.0 {
        return (0, 0);
    }
    let distance = distance * scale_factor as f64;
    let gov = government.ordinal() + i32::from(city.we_love_king_day);

    let corruption_factor = 15.0 / (4 + gov) as f64;
    let waste_factor = 15.0 / (4 + 4 * gov) as f64;

    let mut corruption =
        trade as f64 * distance.min(CORRUPTION_DISTANCE_CAP) * corruption_factor / 100.0;
    let mut waste =
        shields_after_support as f64 * distance.min(WASTE_DISTANCE_CAP) * waste_factor / 100.0;

    if city.improvement_exists(ImprovementType::Courthouse) {
        corruption *= 0.5;
        waste *= 0.5;
    }

    (corruption.trunc() as i32, waste.trunc() as i32)
}

/// Sum the worked-tile yields of `city` under `government`
pub fn tile_totals(game: &Game, city: &City, government: Government) -> TileTotals {
    let low_organisation = government.is_low_organisation();
    let organisation = city.organization_level;

    let mut totals = TileTotals::default();
    for &pos in city.worked_tiles() {
        let tile = game.map.tile(pos).unwrap_or_else(|| {
            panic!("city {:?} ({}) works off-map tile {:?}", city.id, city.name, pos)
        });
        let rated = RatedTile::new(tile, &game.rules.terrain);
        totals.food += rated.food(low_organisation);
        totals.shields += rated.shields(low_organisation);
        totals.trade += rated.trade(organisation);
    }
    totals
}

/// Recompute every derived output field of `city` under `government`.
///
/// Expects unit support to have been resolved already. Panics if the city's
/// worked tiles are inconsistent with its size.
pub fn calculate_output(game: &mut Game, city_id: CityId, government: Government) -> Result<()> {
    let city = game
        .cities
        .get(city_id.index())
        .ok_or(EconomyError::CityNotFound(city_id))?;
    city.assert_worked_tiles_consistent();

    let totals = tile_totals(game, city, government);

    let mut support = 0;
    let mut settlers = 0;
    for &id in &city.supported_units {
        let unit = game.unit(id)?;
        if unit.needs_support {
            support += 1;
        }
        if unit.is_settler() {
            settlers += 1;
        }
    }

    let distance = distance_factor(game, city, government);
    let (corruption, waste) = losses(
        city,
        government,
        distance,
        game.map.scale_factor,
        totals.trade,
        totals.shields - support,
    );

    let cosmic = &game.rules.cosmic;
    let settler_food = if government <= Government::Monarchy {
        cosmic.settlers_eat_till_monarchy
    } else {
        cosmic.settlers_eat_from_communism
    };
    let food_consumption = city.size() * cosmic.food_eaten_per_turn + settlers * settler_food;

    let city = &mut game.cities[city_id.index()];
    city.support = support;
    city.corruption = corruption;
    city.waste = waste;
    city.total_production = totals.shields;
    city.trade = totals.trade - corruption;
    city.production = totals.shields - support - waste;
    city.food_production = totals.food;
    city.food_consumption = food_consumption;
    city.surplus_hunger = totals.food - food_consumption;

    debug!(
        city = %city.name,
        ?government,
        distance,
        production = city.production,
        trade = city.trade,
        corruption,
        waste,
        surplus = city.surplus_hunger,
        "recalculated output"
    );
    Ok(())
}

/// Recompute output under the owner's current government.
///
/// The city's organisation level is refreshed first, so a government
/// change takes effect on tile trade as well as on losses.
pub fn recalculate(game: &mut Game, city_id: CityId) -> Result<()> {
    let government = game.government_of_city(city_id)?;
    refresh_organization_level(game, city_id)?;
    calculate_output(game, city_id, government)
}
