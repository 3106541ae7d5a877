//! Per-context feedback synchronization
//!
//! A context is one placed action instance on the device. Each tick it recomputes key
//! state, title and encoder display from simulator data and pushes what the device needs.
//! State and title are diffed against the cache; encoder feedback is always pushed.
//!
//! After a key release the device flips the key state on its own. Actions that trigger
//! this get a frame-counted delayed re-send ([`ResyncState::PendingForcedResync`]) so the
//! plugin's state lands after the device's, instead of racing it.

mod monitors;

pub use monitors::{CompareCondition, ComparisonMonitor, TitleMonitor};

use tracing::debug;

use crate::actions::{create_action, KeyEvent, SendAction};
use crate::device::{DeviceSink, Target};
use crate::display::{determine_encoder_display, Feedback};
use crate::settings::ContextSettings;
use crate::sim::SimulatorInterface;

/// Ticks to wait after a key release before re-sending state
pub const NUM_FRAMES_DELAY_FORCED_STATE_UPDATE: i32 = 3;

/// Delayed re-send of the key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResyncState {
    #[default]
    Idle,
    /// Ticks left before the state is re-sent
    PendingForcedResync(i32),
}

impl ResyncState {
    /// Count one tick down; true when the state must be re-sent now
    fn tick(&mut self) -> bool {
        match *self {
            ResyncState::Idle => false,
            ResyncState::PendingForcedResync(frames) => {
                let remaining = frames - 1;
                if remaining <= 0 {
                    *self = ResyncState::Idle;
                    true
                } else {
                    *self = ResyncState::PendingForcedResync(remaining);
                    false
                }
            }
        }
    }
}

/// What the plugin last told the device about this context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextCache {
    pub current_state: u32,
    pub current_title: String,
    /// Last encoder display, for tracing only
    pub last_display_signature: String,
    pub resync: ResyncState,
}

/// One action instance on the device
pub struct StreamdeckContext {
    context: String,
    action_uuid: String,
    send_action: Box<dyn SendAction>,
    settings: ContextSettings,
    comparison: ComparisonMonitor,
    title: TitleMonitor,
    cache: ContextCache,
}

impl StreamdeckContext {
    /// Create a context; `None` when the action UUID has no backend behaviour
    pub fn new(action_uuid: &str, context: &str, settings: ContextSettings) -> Option<Self> {
        let send_action = create_action(action_uuid)?;
        Some(Self::with_action(action_uuid, context, send_action, settings))
    }

    pub fn with_action(
        action_uuid: &str,
        context: &str,
        send_action: Box<dyn SendAction>,
        settings: ContextSettings,
    ) -> Self {
        let mut ctx = Self {
            context: context.to_string(),
            action_uuid: action_uuid.to_string(),
            send_action,
            settings: ContextSettings::default(),
            comparison: ComparisonMonitor::default(),
            title: TitleMonitor::default(),
            cache: ContextCache::default(),
        };
        ctx.update_settings(settings);
        ctx
    }

    pub fn id(&self) -> &str {
        &self.context
    }

    pub fn action_uuid(&self) -> &str {
        &self.action_uuid
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ContextCache {
        &self.cache
    }

    /// Replace settings and rebuild the monitors before the next tick
    ///
    /// Cached state and title are kept; the next tick corrects them if they changed.
    pub fn update_settings(&mut self, settings: ContextSettings) {
        self.comparison = ComparisonMonitor::from_settings(&settings);
        self.title = TitleMonitor::from_settings(&settings);
        self.settings = settings;
    }

    /// One polling tick
    pub fn update_state(&mut self, sim: &dyn SimulatorInterface, sink: &mut dyn DeviceSink) {
        let state = self.comparison.determine_state(sim);
        let title = self.title.determine_title(sim);

        if state != self.cache.current_state {
            self.cache.current_state = state;
            sink.set_state(state, &self.context);
        }
        if title != self.cache.current_title {
            sink.set_title(&title, &self.context, Target::HardwareAndSoftware);
            self.cache.current_title = title;
        }

        if let Some(display) =
            determine_encoder_display(self.send_action.encoder(), sim, &self.settings)
        {
            let signature = display.signature();
            if signature != self.cache.last_display_signature {
                debug!(
                    "Encoder display for {}: '{}' -> '{}'",
                    self.context, self.cache.last_display_signature, signature
                );
                self.cache.last_display_signature = signature;
            }
            sink.set_feedback(&Feedback::from(&display), &self.context);
        }

        if self.cache.resync.tick() {
            debug!("Delayed state re-send for {}", self.context);
            self.force_send_state(sink);
        }
    }

    pub fn force_send_state(&self, sink: &mut dyn DeviceSink) {
        sink.set_state(self.cache.current_state, &self.context);
    }

    pub fn force_send_state_after_delay(&mut self, frames: i32) {
        self.cache.resync = ResyncState::PendingForcedResync(frames);
    }

    pub fn handle_button_pressed(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        event: KeyEvent,
    ) {
        self.send_action
            .handle_button_pressed(sim, sink, &self.settings, event);
    }

    pub fn handle_button_released(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        event: KeyEvent,
    ) {
        self.send_action
            .handle_button_released(sim, sink, &self.settings, event);

        if self.send_action.delay_send_state() {
            self.force_send_state_after_delay(NUM_FRAMES_DELAY_FORCED_STATE_UPDATE);
        } else {
            self.force_send_state(sink);
        }
    }

    pub fn handle_encoder_rotation(
        &mut self,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
        ticks: i32,
    ) {
        match self.send_action.encoder_mut() {
            Some(encoder) => encoder.handle_encoder_rotation(sim, sink, &self.settings, ticks),
            None => debug!("Ignoring dial rotation on {}: not a dial action", self.context),
        }
    }

    pub fn handle_encoder_press(&mut self, sim: &mut dyn SimulatorInterface, sink: &mut dyn DeviceSink) {
        match self.send_action.encoder_mut() {
            Some(encoder) => encoder.handle_encoder_press(sim, sink, &self.settings),
            None => debug!("Ignoring dial press on {}: not a dial action", self.context),
        }
        self.force_send_state(sink);
    }
}
