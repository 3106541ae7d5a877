use serde_json::{json, Value};
use std::io::{self, Stdout, Write};
use tracing::{debug, warn};

use super::{DeviceSink, Target};
use crate::display::Feedback;

/// Writes SDK-shaped JSON events, one per line
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &str, context: Option<&str>, payload: Value) {
        let mut line = json!({ "event": event, "payload": payload });
        if let Some(context) = context {
            line["context"] = Value::String(context.to_string());
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!("Failed to write {} event: {}", event, e);
        }
    }
}

impl<W: Write> DeviceSink for ConsoleSink<W> {
    fn set_state(&mut self, state: u32, context: &str) {
        self.emit("setState", Some(context), json!({ "state": state }));
    }

    fn set_title(&mut self, title: &str, context: &str, target: Target) {
        self.emit(
            "setTitle",
            Some(context),
            json!({ "title": title, "target": target.as_sdk() }),
        );
    }

    fn set_feedback(&mut self, feedback: &Feedback, context: &str) {
        match serde_json::to_value(feedback) {
            Ok(payload) => self.emit("setFeedback", Some(context), payload),
            Err(e) => warn!("Failed to serialize feedback for {}: {}", context, e),
        }
    }

    fn log_message(&mut self, message: &str) {
        debug!("{}", message);
        self.emit("logMessage", None, json!({ "message": message }));
    }
}
