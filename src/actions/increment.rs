use tracing::debug;

use super::rotary::{self, IncrementTracker};
use super::{EncoderControl, KeyEvent, SendAction};
use crate::device::DeviceSink;
use crate::mapping::{lookup_image_tolerant, lookup_text_tolerant};
use crate::numeric::canonical;
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Steps a simulator value by `increment_value` on each key press, and by the
/// direction-specific steps when placed on a dial
#[derive(Debug, Default)]
pub struct IncrementAction {
    tracker: IncrementTracker,
}

impl SendAction for IncrementAction {
    fn handle_button_pressed(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        _event: KeyEvent,
    ) {
        let Some(address) = settings.get_str(keys::SEND_ADDRESS) else {
            sink.log_message("[Increment] send_address is empty - cannot send command");
            return;
        };

        self.tracker.refresh(sim, settings);

        let (Some(step), Some(min), Some(max)) = (
            settings.get_decimal(keys::INCREMENT_VALUE),
            settings.get_decimal(keys::INCREMENT_MIN),
            settings.get_decimal(keys::INCREMENT_MAX),
        ) else {
            sink.log_message("[Increment] Invalid settings - not all values are numbers");
            return;
        };

        let cycling = settings.get_bool(keys::INCREMENT_CYCLE_ALLOWED);
        let value = canonical(&self.tracker.apply(step, min, max, cycling));

        debug!("Increment press: {} -> {}", address, value);
        sim.send_command(&address, &value);
    }

    fn handle_button_released(
        &mut self,
        _sim: &mut dyn SimulatorInterface,
        _sink: &mut dyn DeviceSink,
        _settings: &ContextSettings,
        _event: KeyEvent,
    ) {
        // Nothing is sent on release
    }

    fn encoder(&self) -> Option<&dyn EncoderControl> {
        Some(self)
    }

    fn encoder_mut(&mut self) -> Option<&mut dyn EncoderControl> {
        Some(self)
    }
}

impl EncoderControl for IncrementAction {
    /// Monitored value, replaced by its mapped text when a mapping entry is
    /// numerically close enough
    fn current_display_value(
        &self,
        sim: &dyn SimulatorInterface,
        settings: &ContextSettings,
    ) -> Option<String> {
        let id = settings.get_integer(keys::INCREMENT_MONITOR)?;
        let value = sim.get_value_at_addr(id)?;

        let mapping = settings.get_str_or_empty(keys::VALUE_TEXT_MAPPING);
        Some(lookup_text_tolerant(&mapping, &value).unwrap_or_else(|| canonical(&value)))
    }

    fn current_image_path(
        &self,
        sim: &dyn SimulatorInterface,
        settings: &ContextSettings,
    ) -> Option<String> {
        let id = settings.get_integer(keys::INCREMENT_MONITOR)?;
        let value = sim.get_value_at_addr(id)?;
        lookup_image_tolerant(&settings.get_str_or_empty(keys::VALUE_TEXT_MAPPING), &value)
    }

    fn handle_encoder_rotation(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        ticks: i32,
    ) {
        rotary::rotate(&mut self.tracker, sim, sink, settings, ticks);
    }

    fn handle_encoder_press(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
    ) {
        rotary::press(sim, sink, settings);
    }
}
