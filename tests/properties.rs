//! Property-based tests for the city economy
//!
//! Random terrain around a single city, random governments, sizes and
//! garrisons. Each property is checked after the city has been founded and
//! grown through the public API.

use proptest::prelude::*;

use civ_economy::city::{
    add_improvement, found_city, free_support, grow_city, recalculate, reset_food_storage,
    resolve_support, set_unit_support, tile_totals,
};
use civ_economy::core::{CityId, CivId, CosmicRules, TilePos, UnitId};
use civ_economy::entity::{AiRole, Government, Unit};
use civ_economy::rules::{Improvement, ImprovementEffect, ImprovementType, Ruleset, Terrain};
use civ_economy::simulation::Game;
use civ_economy::world::{Map, RatedTile, TileYield};

const CENTER: TilePos = TilePos { x: 7, y: 7 };

type TileSetup = (Terrain, bool, bool, bool);

fn tile_setup() -> impl Strategy<Value = TileSetup> {
    (
        prop::sample::select(Terrain::ALL.to_vec()),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
}

fn government() -> impl Strategy<Value = Government> {
    prop::sample::select(Government::ALL.to_vec())
}

/// A revealed 15x15 flat map with `tiles` laid over the city radius at `CENTER`
fn game_with_terrain(tiles: &[TileSetup], government: Government) -> (Game, CivId) {
    let mut map = Map::filled(15, 15, Terrain::Grassland).with_flat_earth(true);
    for (pos, &(terrain, irrigation, mine, road)) in map.city_radius(CENTER).into_iter().zip(tiles) {
        let tile = map.tile_mut(pos).unwrap();
        tile.terrain = terrain;
        tile.irrigation = irrigation;
        tile.mine = mine;
        tile.road = road;
    }
    let mut game = Game::new(map, Ruleset::with_defaults());
    let civ = game.add_civilization("Hittites", government).unwrap();
    game.map.reveal_all(civ);
    (game, civ)
}

fn grown_city(game: &mut Game, civ: CivId, size: i32, units: usize) -> CityId {
    let city = found_city(game, civ, "Hattusa", CENTER).unwrap();
    while game.city(city).unwrap().size() < size {
        grow_city(game, city).unwrap();
    }
    for i in 0..units {
        let role = if i % 3 == 0 { AiRole::Settle } else { AiRole::Attack };
        let mut unit = Unit::new(UnitId(0), "Unit", civ, role, CENTER).with_attack(1);
        unit.home_city = Some(city);
        game.spawn_unit(unit).unwrap();
    }
    set_unit_support(game, city).unwrap();
    recalculate(game, city).unwrap();
    city
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Shields and trade are fully accounted for after losses and upkeep
    #[test]
    fn prop_output_balances(
        tiles in prop::collection::vec(tile_setup(), 21),
        government in government(),
        size in 1i32..=20,
        units in 0usize..12,
    ) {
        let (mut game, civ) = game_with_terrain(&tiles, government);
        let city = grown_city(&mut game, civ, size, units);

        let c = game.city(city).unwrap();
        let totals = tile_totals(&game, c, government);
        prop_assert_eq!(c.production + c.support + c.waste, c.total_production);
        prop_assert_eq!(c.trade + c.corruption, totals.trade);
        prop_assert_eq!(c.total_production, totals.shields);
        prop_assert!(c.corruption >= 0);
        prop_assert!(c.support <= units as i32);
        prop_assert_eq!(c.surplus_hunger, c.food_production - c.food_consumption);
        prop_assert_eq!(c.worked_tiles().len(), (size + 1) as usize);
    }

    /// Capitals and governments without a palace distance lose nothing
    #[test]
    fn prop_no_losses_without_distance(
        tiles in prop::collection::vec(tile_setup(), 21),
        government in government(),
        size in 1i32..=12,
        capital in any::<bool>(),
    ) {
        let (mut game, civ) = game_with_terrain(&tiles, government);
        let city = found_city(&mut game, civ, "Hattusa", CENTER).unwrap();
        if capital {
            let palace = Improvement::new(ImprovementType::Palace)
                .with_effect(ImprovementEffect::Capital, 1);
            add_improvement(game.city_mut(city).unwrap(), palace).unwrap();
        }
        while game.city(city).unwrap().size() < size {
            grow_city(&mut game, city).unwrap();
        }

        let exempt = capital
            || matches!(government, Government::Democracy | Government::Fundamentalism);
        let c = game.city(city).unwrap();
        if exempt {
            prop_assert_eq!(c.corruption, 0);
            prop_assert_eq!(c.waste, 0);
        }
    }

    /// Workers go to the best tiles, earlier radius tiles winning ties
    #[test]
    fn prop_growth_takes_best_tiles_in_order(
        tiles in prop::collection::vec(tile_setup(), 21),
        government in government(),
        size in 1i32..=20,
    ) {
        let (mut game, civ) = game_with_terrain(&tiles, government);
        let city = grown_city(&mut game, civ, size, 0);

        let organisation = government.organization_level(false);
        let low = organisation == 0;
        let mut candidates: Vec<(TilePos, f64)> = game
            .map
            .city_radius(CENTER)
            .into_iter()
            .skip(1)
            .map(|pos| {
                let rated = RatedTile::new(game.map.tile(pos).unwrap(), &game.rules.terrain);
                let score = 1.5 * rated.food(low) as f64
                    + rated.shields(low) as f64
                    + 0.5 * rated.trade(organisation) as f64;
                (pos, score)
            })
            .collect();
        // Stable, so radius order survives among equal scores
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        let expected: Vec<TilePos> = candidates
            .into_iter()
            .take(size as usize)
            .map(|(pos, _)| pos)
            .collect();

        let c = game.city(city).unwrap();
        prop_assert_eq!(c.worked_tiles()[0], CENTER);
        prop_assert_eq!(&c.worked_tiles()[1..], expected.as_slice());
    }

    /// With no exemptions, exactly the first `free` units are free
    #[test]
    fn prop_first_units_use_free_slots(
        government in government(),
        size in 1i32..=20,
        count in 0usize..25,
    ) {
        let cosmic = CosmicRules::default();
        let free = free_support(size, government, &cosmic);
        let mut units: Vec<Unit> = (0..count)
            .map(|i| Unit::new(UnitId(i as u32), "Musketeers", CivId(0), AiRole::Defend, CENTER))
            .collect();
        resolve_support(free, government == Government::Fundamentalism, units.iter_mut());

        for (i, unit) in units.iter().enumerate() {
            prop_assert_eq!(unit.needs_support, i as i32 >= free);
        }
        let paying = units.iter().filter(|u| u.needs_support).count() as i32;
        prop_assert_eq!(paying, (count as i32 - free).max(0));
    }

    /// A Courthouse halves waste and corruption, truncating
    #[test]
    fn prop_courthouse_halves_losses(
        tiles in prop::collection::vec(tile_setup(), 21),
        government in government(),
        size in 1i32..=20,
        units in 0usize..6,
    ) {
        let (mut game, civ) = game_with_terrain(&tiles, government);
        let city = grown_city(&mut game, civ, size, units);
        let without = game.city(city).unwrap().clone();

        let courthouse = Improvement::new(ImprovementType::Courthouse);
        add_improvement(game.city_mut(city).unwrap(), courthouse).unwrap();
        recalculate(&mut game, city).unwrap();
        let with = game.city(city).unwrap();

        prop_assert_eq!(with.waste, without.waste / 2);
        prop_assert_eq!(with.corruption, without.corruption / 2);
    }

    /// Stored food never leaves the food box, whatever the storage data says
    #[test]
    fn prop_storage_within_food_box(
        magnitudes in prop::collection::vec(-200i32..300, 0..4),
        size in 1i32..=30,
        rows in 1i32..=20,
    ) {
        let (mut game, civ) = game_with_terrain(&[], Government::Monarchy);
        let city = found_city(&mut game, civ, "Hattusa", CENTER).unwrap();
        while game.city(city).unwrap().size() < size {
            grow_city(&mut game, city).unwrap();
        }
        let kinds = [
            ImprovementType::Granary,
            ImprovementType::Harbour,
            ImprovementType::Supermarket,
            ImprovementType::Aqueduct,
        ];
        for (&kind, &magnitude) in kinds.iter().zip(&magnitudes) {
            let store = Improvement::new(kind).with_effect(ImprovementEffect::FoodStorage, magnitude);
            add_improvement(game.city_mut(city).unwrap(), store).unwrap();
        }

        let c = game.city_mut(city).unwrap();
        reset_food_storage(c, rows);
        prop_assert!(c.food_in_storage >= 0);
        prop_assert!(c.food_in_storage <= c.food_box_capacity(rows));
    }
}
