use super::{DeviceSink, Target};
use crate::display::Feedback;

/// One recorded device update
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    State { context: String, state: u32 },
    Title { context: String, title: String, target: Target },
    Feedback { context: String, feedback: Feedback },
    Log(String),
}

/// Keeps every update in memory, for embedding hosts and tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<SinkCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn states(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::State { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Title { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn feedbacks(&self) -> Vec<&Feedback> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Feedback { feedback, .. } => Some(feedback),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Log(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DeviceSink for RecordingSink {
    fn set_state(&mut self, state: u32, context: &str) {
        self.calls.push(SinkCall::State {
            context: context.to_string(),
            state,
        });
    }

    fn set_title(&mut self, title: &str, context: &str, target: Target) {
        self.calls.push(SinkCall::Title {
            context: context.to_string(),
            title: title.to_string(),
            target,
        });
    }

    fn set_feedback(&mut self, feedback: &Feedback, context: &str) {
        self.calls.push(SinkCall::Feedback {
            context: context.to_string(),
            feedback: feedback.clone(),
        });
    }

    fn log_message(&mut self, message: &str) {
        self.calls.push(SinkCall::Log(message.to_string()));
    }
}
