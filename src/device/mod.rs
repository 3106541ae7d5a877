//! Stream Deck device connection
//!
//! The SDK's websocket plumbing lives outside this crate. Contexts push their updates
//! through [`DeviceSink`], which maps one-to-one onto the SDK's outgoing events.

mod console;
mod recording;

pub use console::ConsoleSink;
pub use recording::{RecordingSink, SinkCall};

use serde::Serialize;

use crate::display::Feedback;

/// Which surfaces a title update applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Target {
    #[default]
    HardwareAndSoftware,
    Hardware,
    Software,
}

impl Target {
    /// SDK wire value for the target
    pub fn as_sdk(self) -> u8 {
        match self {
            Target::HardwareAndSoftware => 0,
            Target::Hardware => 1,
            Target::Software => 2,
        }
    }
}

/// Outgoing device updates
pub trait DeviceSink {
    fn set_state(&mut self, state: u32, context: &str);
    fn set_title(&mut self, title: &str, context: &str, target: Target);
    fn set_feedback(&mut self, feedback: &Feedback, context: &str);
    fn log_message(&mut self, message: &str);
}
