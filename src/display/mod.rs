//! Encoder LCD display resolution
//!
//! Turns a live simulator value plus the context's settings into an
//! [`EncoderDisplayData`] descriptor, and that descriptor into the SDK feedback payload.

mod feedback;
mod indicator;
mod resolver;

pub use feedback::{Feedback, FeedbackFont, FeedbackIcon, FeedbackIndicator, FeedbackText};
pub use indicator::calculate_indicator;
pub use resolver::{determine_encoder_display, resolve_display, EncoderDisplayData};
