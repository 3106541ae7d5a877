//! Send actions: what a context does with key and dial input
//!
//! Every context owns one [`SendAction`]. Dial-capable kinds additionally expose
//! [`EncoderControl`] through [`SendAction::encoder`], so callers check the capability
//! once instead of inspecting the concrete kind.

mod encoder;
mod increment;
mod momentary;
mod rotary;
mod switch;

pub use encoder::EncoderAction;
pub use increment::IncrementAction;
pub use momentary::MomentaryAction;
pub use rotary::IncrementTracker;
pub use switch::SwitchAction;

use crate::device::DeviceSink;
use crate::settings::ContextSettings;
use crate::sim::SimulatorInterface;

/// Key payload details the actions care about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Device state of the key when the event fired
    pub state: u32,
}

/// Behaviour of a context on key input
pub trait SendAction {
    fn handle_button_pressed(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        event: KeyEvent,
    );

    fn handle_button_released(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        event: KeyEvent,
    );

    /// True when the device flips this key's state on its own after release, so the
    /// correct state must be re-sent once that has settled
    fn delay_send_state(&self) -> bool {
        false
    }

    fn encoder(&self) -> Option<&dyn EncoderControl> {
        None
    }

    fn encoder_mut(&mut self) -> Option<&mut dyn EncoderControl> {
        None
    }
}

/// Dial input and touch display capability
pub trait EncoderControl {
    /// Value to show on the dial's display, `None` when there is nothing live to show
    fn current_display_value(
        &self,
        sim: &dyn SimulatorInterface,
        settings: &ContextSettings,
    ) -> Option<String>;

    /// Image mapped to the current value with the `IMG:` notation
    fn current_image_path(
        &self,
        _sim: &dyn SimulatorInterface,
        _settings: &ContextSettings,
    ) -> Option<String> {
        None
    }

    fn handle_encoder_rotation(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
        ticks: i32,
    );

    fn handle_encoder_press(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        settings: &ContextSettings,
    );
}

/// Action kinds, picked from the Stream Deck action UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Momentary,
    Switch,
    Increment,
    Encoder,
}

impl ActionKind {
    /// Kind for an action UUID such as `com.ctytler.dcs.increment.button`
    pub fn from_uuid(uuid: &str) -> Option<Self> {
        // Encoder before increment: dial UUIDs may mention both
        if uuid.contains("encoder") {
            Some(ActionKind::Encoder)
        } else if uuid.contains("increment") {
            Some(ActionKind::Increment)
        } else if uuid.contains("switch") {
            Some(ActionKind::Switch)
        } else if uuid.contains("momentary") {
            Some(ActionKind::Momentary)
        } else {
            None
        }
    }

    pub fn create(self) -> Box<dyn SendAction> {
        match self {
            ActionKind::Momentary => Box::new(MomentaryAction),
            ActionKind::Switch => Box::new(SwitchAction),
            ActionKind::Increment => Box::new(IncrementAction::default()),
            ActionKind::Encoder => Box::new(EncoderAction::default()),
        }
    }
}

/// Build the action for a UUID; unknown UUIDs have no action
pub fn create_action(uuid: &str) -> Option<Box<dyn SendAction>> {
    ActionKind::from_uuid(uuid).map(ActionKind::create)
}
