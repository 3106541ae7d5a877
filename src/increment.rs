//! Increment and cycling arithmetic for rotary and increment controls

use rust_decimal::Decimal;

/// Value after applying `delta` to `current` within `[min, max]`
///
/// Without cycling the result is clamped. With cycling an overshoot of `k` past `max`
/// lands at `min + k` (and an undershoot of `k` below `min` at `max - k`), taken modulo
/// the span so any step size stays in range. A non-positive span cannot cycle and
/// yields `min`.
pub fn next_increment(
    current: Decimal,
    delta: Decimal,
    min: Decimal,
    max: Decimal,
    cycling_allowed: bool,
) -> Decimal {
    let candidate = current.saturating_add(delta);

    if !cycling_allowed {
        return if candidate > max {
            max
        } else if candidate < min {
            min
        } else {
            candidate
        };
    }

    let span = max.saturating_sub(min);
    if span <= Decimal::ZERO {
        return min;
    }

    if candidate > max {
        let overshoot = candidate.saturating_sub(max);
        min.saturating_add(overshoot.checked_rem(span).unwrap_or(Decimal::ZERO))
    } else if candidate < min {
        let undershoot = min.saturating_sub(candidate);
        max.saturating_sub(undershoot.checked_rem(span).unwrap_or(Decimal::ZERO))
    } else {
        candidate
    }
}
