//! City economy demo
//!
//! Generates a random map, founds a few cities and runs the food box for a
//! number of turns, printing each city's economy at the end.

use std::path::PathBuf;

use civ_economy::city::{
    add_improvement, found_city, grow_city, recalculate, reset_food_storage, set_unit_support,
    shrink_city,
};
use civ_economy::core::{CityId, Result, TilePos};
use civ_economy::entity::{Difficulty, Government};
use civ_economy::rules::{ImprovementType, Ruleset, Terrain};
use civ_economy::simulation::Game;
use civ_economy::world::Map;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// City economy demo - grow cities on a random map
#[derive(Parser, Debug)]
#[command(name = "city_sim")]
#[command(about = "Run the city economy on a random map")]
struct Args {
    /// Random seed for the map
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Turns to simulate
    #[arg(long, default_value_t = 50)]
    turns: u32,

    /// Government: anarchy, despotism, monarchy, communism, fundamentalism, republic, democracy
    #[arg(long, default_value = "monarchy")]
    government: String,

    /// Optional ruleset TOML overriding the defaults
    #[arg(long)]
    ruleset: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long, default_value_t = 40)]
    width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = 30)]
    height: i32,
}

fn parse_government(name: &str) -> Option<Government> {
    Government::ALL
        .into_iter()
        .find(|g| format!("{:?}", g).eq_ignore_ascii_case(name))
}

fn random_map(rng: &mut ChaCha8Rng, width: i32, height: i32) -> Map {
    let mut map = Map::filled(width, height, Terrain::Ocean);
    let positions: Vec<TilePos> = map.positions().collect();
    for pos in positions {
        let roll = rng.gen_range(0..100);
        let Some(tile) = map.tile_mut(pos) else {
            continue;
        };
        tile.terrain = match roll {
            0..=29 => Terrain::Grassland,
            30..=49 => Terrain::Plains,
            50..=59 => Terrain::Forest,
            60..=67 => Terrain::Hills,
            68..=72 => Terrain::Mountains,
            73..=77 => Terrain::Desert,
            78..=81 => Terrain::Swamp,
            82..=84 => Terrain::Jungle,
            85..=87 => Terrain::Tundra,
            _ => Terrain::Ocean,
        };
        tile.irrigation = rng.gen_bool(0.2);
        tile.road = rng.gen_bool(0.3);
        tile.mine = !tile.irrigation && rng.gen_bool(0.1);
    }
    map
}

/// One turn of the food box for a city
fn run_city_turn(game: &mut Game, id: CityId) -> Result<()> {
    set_unit_support(game, id)?;
    recalculate(game, id)?;

    let rows = game.rules.cosmic.food_box_rows;
    let city = game.city_mut(id)?;
    city.food_in_storage += city.surplus_hunger;
    let capacity = city.food_box_capacity(rows);

    if city.food_in_storage >= capacity {
        grow_city(game, id)?;
        reset_food_storage(game.city_mut(id)?, rows);
    } else if city.food_in_storage < 0 {
        if city.size() > 1 {
            shrink_city(game, id)?;
            reset_food_storage(game.city_mut(id)?, rows);
        } else {
            city.food_in_storage = 0;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let Some(government) = parse_government(&args.government) else {
        tracing::error!("Unknown government: {}", args.government);
        std::process::exit(2);
    };

    let rules = match &args.ruleset {
        Some(path) => Ruleset::load_from_toml(path)?,
        None => Ruleset::with_defaults(),
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let map = random_map(&mut rng, args.width, args.height);
    let mut game = Game::new(map, rules).with_difficulty(Difficulty::Prince);
    let civ = game.add_civilization("Babylonians", government)?;
    game.map.reveal_all(civ);

    tracing::info!(
        "Starting city economy demo: {}x{} map, {:?}, {} turns",
        args.width,
        args.height,
        government,
        args.turns
    );

    let sites = [
        TilePos::new(args.width / 4, args.height / 2),
        TilePos::new(args.width / 2, args.height / 3),
        TilePos::new(3 * args.width / 4, 2 * args.height / 3),
    ];
    let mut cities = Vec::new();
    for (i, site) in sites.into_iter().enumerate() {
        if let Some(tile) = game.map.tile_mut(site) {
            tile.terrain = Terrain::Grassland;
        }
        let id = found_city(&mut game, civ, format!("City {}", i + 1), site)?;
        cities.push(id);
    }
    let palace = game.rules.improvements.instantiate(ImprovementType::Palace);
    add_improvement(game.city_mut(cities[0])?, palace)?;
    let granary = game.rules.improvements.instantiate(ImprovementType::Granary);
    add_improvement(game.city_mut(cities[1])?, granary)?;

    for _ in 0..args.turns {
        game.begin_turn();
        for &id in &cities {
            run_city_turn(&mut game, id)?;
        }
        game.drain_map_events();
    }

    println!("After {} turns under {:?}:", args.turns, government);
    for &id in &cities {
        let city = game.city(id)?;
        println!(
            "  {:<8} size {:>2} | food {:>3}/{:<3} (+{:>2}) | shields {:>3} -> {:>3} (waste {:>2}, support {:>2}) | trade {:>3} (corruption {:>2})",
            city.name,
            city.size(),
            city.food_in_storage,
            city.food_box_capacity(game.rules.cosmic.food_box_rows),
            city.surplus_hunger,
            city.total_production,
            city.production,
            city.waste,
            city.support,
            city.trade,
            city.corruption,
        );
    }
    Ok(())
}
