mod handler;

pub use handler::InputHandler;

use serde::Deserialize;

use crate::settings::ContextSettings;

/// Events the Stream Deck delivers for placed actions
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeckEvent {
    WillAppear {
        context: String,
        action: String,
        #[serde(default)]
        settings: ContextSettings,
    },
    WillDisappear {
        context: String,
    },
    DidReceiveSettings {
        context: String,
        #[serde(default)]
        settings: ContextSettings,
    },
    KeyDown {
        context: String,
    },
    KeyUp {
        context: String,
        /// Key state the device reported before the release
        #[serde(default)]
        state: u32,
    },
    DialRotate {
        context: String,
        ticks: i32,
    },
    DialPress {
        context: String,
    },
}

impl DeckEvent {
    pub fn context(&self) -> &str {
        match self {
            DeckEvent::WillAppear { context, .. }
            | DeckEvent::WillDisappear { context }
            | DeckEvent::DidReceiveSettings { context, .. }
            | DeckEvent::KeyDown { context }
            | DeckEvent::KeyUp { context, .. }
            | DeckEvent::DialRotate { context, .. }
            | DeckEvent::DialPress { context } => context,
        }
    }
}
