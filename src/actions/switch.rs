use super::{KeyEvent, SendAction};
use crate::device::DeviceSink;
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Two-position switch: sends the value for the state the key is leaving
#[derive(Debug, Default)]
pub struct SwitchAction;

impl SendAction for SwitchAction {
    fn handle_button_pressed(
        &mut self,
        _sim: &mut dyn SimulatorInterface,
        _sink: &mut dyn DeviceSink,
        _settings: &ContextSettings,
        _event: KeyEvent,
    ) {
    }

    fn handle_button_released(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        _sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        event: KeyEvent,
    ) {
        let value_key = if event.state == 0 {
            keys::FIRST_STATE_VALUE
        } else {
            keys::SECOND_STATE_VALUE
        };

        if let (Some(address), Some(value)) = (
            settings.get_str(keys::SEND_ADDRESS),
            settings.get_str(value_key),
        ) {
            sim.send_command(&address, &value);
        }
    }

    fn delay_send_state(&self) -> bool {
        true
    }
}
