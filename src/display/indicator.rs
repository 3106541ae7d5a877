use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Gauge position (0-100) of the monitored value within `[increment_min, increment_max]`
///
/// Returns `None` when min, max or the monitor id are not configured, when the simulator
/// has no value for the id, or when the range is empty or inverted.
pub fn calculate_indicator(sim: &dyn SimulatorInterface, settings: &ContextSettings) -> Option<i32> {
    let min = settings.get_decimal(keys::INCREMENT_MIN)?;
    let max = settings.get_decimal(keys::INCREMENT_MAX)?;
    let id = settings.get_integer(keys::INCREMENT_MONITOR)?;

    let current = sim.get_value_at_addr(id)?;

    let range = max.checked_sub(min)?;
    if range <= Decimal::ZERO {
        return None;
    }

    let percentage = current
        .checked_sub(min)?
        .checked_div(range)?
        .checked_mul(HUNDRED)?;

    percentage
        .clamp(Decimal::ZERO, HUNDRED)
        .trunc()
        .to_i32()
}
