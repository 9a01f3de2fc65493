//! City layer - worked tiles, output, upkeep, food storage and improvements

pub mod growth;
pub mod improvements;
pub mod output;
pub mod state;
pub mod storage;
pub mod support;
pub mod workers;

pub use growth::{found_city, grow_city, reassign_workers, refresh_organization_level, shrink_city};
pub use improvements::{add_improvement, sell_improvement};
pub use output::{calculate_output, distance_factor, recalculate, tile_totals, TileTotals};
pub use state::City;
pub use storage::{reset_food_storage, storage_percentage};
pub use support::{free_support, resolve_support, set_unit_support};
pub use workers::{grow_selection, release_unworkable_tiles, shrink_selection};
