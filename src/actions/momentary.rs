use super::{KeyEvent, SendAction};
use crate::device::DeviceSink;
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Sends `press_value` on key down and `release_value` on key up
#[derive(Debug, Default)]
pub struct MomentaryAction;

fn send_setting(sim: &mut dyn SimulatorInterface, settings: &ContextSettings, value_key: &str) {
    if let (Some(address), Some(value)) = (
        settings.get_str(keys::SEND_ADDRESS),
        settings.get_str(value_key),
    ) {
        sim.send_command(&address, &value);
    }
}

impl SendAction for MomentaryAction {
    fn handle_button_pressed(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        _sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        _event: KeyEvent,
    ) {
        send_setting(sim, settings, keys::PRESS_VALUE);
    }

    fn handle_button_released(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        _sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        _event: KeyEvent,
    ) {
        if !settings.get_bool(keys::DISABLE_RELEASE_CHECK) {
            send_setting(sim, settings, keys::RELEASE_VALUE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RecordingSink;
    use crate::sim::SimState;
    use serde_json::json;

    fn run(settings: ContextSettings) -> Vec<String> {
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();
        let mut action = MomentaryAction;
        action.handle_button_pressed(&mut sim, &mut sink, &settings, KeyEvent::default());
        action.handle_button_released(&mut sim, &mut sink, &settings, KeyEvent::default());
        sim.take_sent().into_iter().map(|c| c.value).collect()
    }

    #[test]
    fn test_press_and_release() {
        let settings = ContextSettings::from_value(json!({
            "send_address": "25,3001",
            "press_value": "1",
            "release_value": "0",
        }));
        assert_eq!(run(settings), vec!["1", "0"]);
    }

    #[test]
    fn test_release_disabled() {
        let settings = ContextSettings::from_value(json!({
            "send_address": "25,3001",
            "press_value": "1",
            "release_value": "0",
            "disable_release_check": true,
        }));
        assert_eq!(run(settings), vec!["1"]);
    }

    #[test]
    fn test_nothing_without_address() {
        let settings = ContextSettings::from_value(json!({ "press_value": "1", "release_value": "0" }));
        assert!(run(settings).is_empty());
    }
}
