//! Buying and selling city improvements

use tracing::debug;

use crate::city::state::City;
use crate::core::error::{EconomyError, Result};
use crate::rules::improvements::{Improvement, ImprovementType};

/// Add an improvement; a city holds at most one of each kind
pub fn add_improvement(city: &mut City, improvement: Improvement) -> Result<()> {
    if city.improvements.contains_key(&improvement.kind) {
        return Err(EconomyError::DuplicateImprovement {
            city: city.id,
            improvement: improvement.kind,
        });
    }
    debug!(city = %city.name, improvement = %improvement.name, "improvement added");
    city.improvements.insert(improvement.kind, improvement);
    Ok(())
}

/// Sell an improvement. Only one improvement may be sold per city per turn.
///
/// Returns the sold improvement, or `None` if the city already sold one this
/// turn or does not have `kind`. Nothing changes in either case.
pub fn sell_improvement(city: &mut City, kind: ImprovementType) -> Option<Improvement> {
    if city.improvement_sold {
        return None;
    }
    let sold = city.improvements.remove(&kind)?;
    city.improvement_sold = true;
    debug!(city = %city.name, improvement = %sold.name, "improvement sold");
    Some(sold)
}
