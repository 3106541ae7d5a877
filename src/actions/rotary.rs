//! Dial rotation and press handling shared by the dial-capable actions

use rust_decimal::Decimal;
use std::cmp::Ordering;
use tracing::debug;

use crate::device::DeviceSink;
use crate::increment::next_increment;
use crate::numeric::canonical;
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Last known value of the monitored increment datum
///
/// Refreshed from the simulator right before each increment so external changes are
/// never overwritten with stale state. When the simulator has not reported the datum,
/// the previously sent value is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncrementTracker {
    current: Decimal,
}

impl IncrementTracker {
    pub fn current(&self) -> Decimal {
        self.current
    }

    /// Poll `dcs_id_increment_monitor`
    pub fn refresh(&mut self, sim: &dyn SimulatorInterface, settings: &ContextSettings) {
        if let Some(value) = settings
            .get_integer(keys::INCREMENT_MONITOR)
            .and_then(|id| sim.get_value_at_addr(id))
        {
            self.current = value;
        }
    }

    /// Apply `delta` within the configured range and remember the result
    pub fn apply(&mut self, delta: Decimal, min: Decimal, max: Decimal, cycling: bool) -> Decimal {
        self.current = next_increment(self.current, delta, min, max, cycling);
        self.current
    }
}

/// Handle dial rotation: `ticks > 0` steps by `increment_cw`, `ticks < 0` by `increment_ccw`
pub(crate) fn rotate(
    tracker: &mut IncrementTracker,
    sim: &mut dyn SimulatorInterface,
    sink: &mut dyn DeviceSink,
    settings: &ContextSettings,
    ticks: i32,
) {
    let step_key = match ticks.cmp(&0) {
        Ordering::Greater => keys::INCREMENT_CW,
        Ordering::Less => keys::INCREMENT_CCW,
        Ordering::Equal => {
            sink.log_message("[Encoder Rotation] No rotation (ticks = 0), ignoring");
            return;
        }
    };

    let Some(send_address) = settings.get_str(keys::SEND_ADDRESS) else {
        sink.log_message("[Encoder Rotation] send_address is empty - cannot send command");
        return;
    };

    tracker.refresh(sim, settings);

    let (Some(step), Some(min), Some(max)) = (
        settings.get_decimal(step_key),
        settings.get_decimal(keys::INCREMENT_MIN),
        settings.get_decimal(keys::INCREMENT_MAX),
    ) else {
        sink.log_message("[Encoder Rotation] Invalid settings - not all values are numbers");
        return;
    };

    let delta = step.saturating_mul(Decimal::from(ticks.unsigned_abs()));
    let cycling = settings.get_bool(keys::INCREMENT_CYCLE_ALLOWED);
    let value = canonical(&tracker.apply(delta, min, max, cycling));

    debug!(
        "Rotation {} ticks via {}: {} -> {}",
        ticks, step_key, send_address, value
    );
    sink.log_message(&format!(
        "[Encoder Rotation] Sending value: {} to address: {}",
        value, send_address
    ));
    sim.send_command(&send_address, &value);
}

/// Handle dial press: send `encoder_press_value`, falling back to `increment_min`
pub(crate) fn press(
    sim: &mut dyn SimulatorInterface,
    sink: &mut dyn DeviceSink,
    settings: &ContextSettings,
) {
    let Some(send_address) = settings.get_str(keys::SEND_ADDRESS) else {
        sink.log_message("[Encoder Press] send_address is empty - cannot send command");
        return;
    };

    let value = settings
        .get_str(keys::ENCODER_PRESS_VALUE)
        .or_else(|| settings.get_str(keys::INCREMENT_MIN));

    match value {
        Some(value) => {
            sink.log_message(&format!(
                "[Encoder Press] Sending value: {} to address: {}",
                value, send_address
            ));
            sim.send_command(&send_address, &value);
        }
        None => sink.log_message(
            "[Encoder Press] No value to send - both encoder_press_value and increment_min are empty",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RecordingSink;
    use crate::sim::{SentCommand, SimState};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn dial_settings(cycle: bool) -> ContextSettings {
        ContextSettings::from_value(json!({
            "send_address": "25,3001",
            "dcs_id_increment_monitor": "100",
            "increment_cw": "0.1",
            "increment_ccw": "-0.1",
            "increment_min": "0",
            "increment_max": "1",
            "increment_cycle_allowed_check": cycle,
        }))
    }

    fn sent_values(sim: &mut SimState) -> Vec<String> {
        sim.take_sent().into_iter().map(|c| c.value).collect()
    }

    #[test]
    fn test_rotation_uses_direction_step_and_polls_first() {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();
        let mut tracker = IncrementTracker::default();
        let settings = dial_settings(false);

        sim.set_value(100, dec!(0.5));
        rotate(&mut tracker, &mut sim, &mut sink, &settings, 2);
        assert_eq!(sent_values(&mut sim), vec!["0.7"]);

        // Simulator moved on its own; the next step starts from there
        sim.set_value(100, dec!(0.2));
        rotate(&mut tracker, &mut sim, &mut sink, &settings, -1);
        assert_eq!(
            sim.take_sent(),
            vec![SentCommand {
                address: "25,3001".to_string(),
                value: "0.1".to_string()
            }]
        );
    }

    #[test]
    fn test_rotation_clamps_and_cycles() {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();
        sim.set_value(100, dec!(0.95));

        let mut tracker = IncrementTracker::default();
        rotate(&mut tracker, &mut sim, &mut sink, &dial_settings(false), 1);
        assert_eq!(sent_values(&mut sim), vec!["1"]);

        let mut tracker = IncrementTracker::default();
        rotate(&mut tracker, &mut sim, &mut sink, &dial_settings(true), 1);
        assert_eq!(sent_values(&mut sim), vec!["0.05"]);
    }

    #[test]
    fn test_rotation_without_simulator_value_continues_from_last_sent() {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();
        let mut tracker = IncrementTracker::default();
        let settings = dial_settings(false);

        rotate(&mut tracker, &mut sim, &mut sink, &settings, 1);
        rotate(&mut tracker, &mut sim, &mut sink, &settings, 1);
        assert_eq!(sent_values(&mut sim), vec!["0.1", "0.2"]);
        assert_eq!(tracker.current(), dec!(0.2));
    }

    #[test]
    fn test_rotation_ignored_without_ticks_or_numbers() {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();
        let mut tracker = IncrementTracker::default();

        rotate(&mut tracker, &mut sim, &mut sink, &dial_settings(false), 0);

        let bad = ContextSettings::from_value(json!({
            "send_address": "25,3001",
            "increment_cw": "fast",
            "increment_min": "0",
            "increment_max": "1",
        }));
        rotate(&mut tracker, &mut sim, &mut sink, &bad, 1);

        assert!(sim.sent().is_empty());
        assert_eq!(sink.logs().len(), 2);
    }

    #[test]
    fn test_press_prefers_press_value_then_min() {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();

        let with_press = ContextSettings::from_value(json!({
            "send_address": "25,3001",
            "encoder_press_value": "0.5",
            "increment_min": "0",
        }));
        press(&mut sim, &mut sink, &with_press);

        let min_only = ContextSettings::from_value(json!({
            "send_address": "25,3001",
            "increment_min": "0",
        }));
        press(&mut sim, &mut sink, &min_only);

        assert_eq!(sent_values(&mut sim), vec!["0.5", "0"]);
    }

    #[test]
    fn test_press_needs_address_and_value() {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();

        press(&mut sim, &mut sink, &ContextSettings::from_value(json!({ "encoder_press_value": "1" })));
        press(&mut sim, &mut sink, &ContextSettings::from_value(json!({ "send_address": "25,3001" })));

        assert!(sim.sent().is_empty());
        assert_eq!(sink.logs().len(), 2);
    }
}
