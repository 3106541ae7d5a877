use super::rotary::{self, IncrementTracker};
use super::{EncoderControl, KeyEvent, SendAction};
use crate::device::DeviceSink;
use crate::mapping::lookup_image_tolerant;
use crate::numeric::canonical;
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Dial bound to one simulator value; key events are not used
#[derive(Debug, Default)]
pub struct EncoderAction {
    tracker: IncrementTracker,
}

impl SendAction for EncoderAction {
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
        _sim: &mut dyn SimulatorInterface,
        _sink: &mut dyn DeviceSink,
        _settings: &ContextSettings,
        _event: KeyEvent,
    ) {
    }

    fn encoder(&self) -> Option<&dyn EncoderControl> {
        Some(self)
    }

    fn encoder_mut(&mut self) -> Option<&mut dyn EncoderControl> {
        Some(self)
    }
}

impl EncoderControl for EncoderAction {
    /// Canonical monitored value; mapping is left to the display resolver
    fn current_display_value(
        &self,
        sim: &dyn SimulatorInterface,
        settings: &ContextSettings,
    ) -> Option<String> {
        let id = settings.get_integer(keys::INCREMENT_MONITOR)?;
        sim.get_value_at_addr(id).map(|v| canonical(&v))
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
