//! Per-context settings as written by the property inspector
//!
//! Settings are an opaque JSON object owned by the host. The backend only reads named keys.
//! A missing key and an empty string both mean "not configured". Older inspectors stored
//! numeric fields as JSON numbers, so string accessors accept those too.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::numeric::{parse_decimal, parse_integer};

/// Setting keys read by the backend
pub mod keys {
    pub const SEND_ADDRESS: &str = "send_address";

    pub const PRESS_VALUE: &str = "press_value";
    pub const RELEASE_VALUE: &str = "release_value";
    pub const DISABLE_RELEASE_CHECK: &str = "disable_release_check";
    pub const FIRST_STATE_VALUE: &str = "send_when_first_state_value";
    pub const SECOND_STATE_VALUE: &str = "send_when_second_state_value";

    pub const INCREMENT_MONITOR: &str = "dcs_id_increment_monitor";
    pub const INCREMENT_VALUE: &str = "increment_value";
    pub const INCREMENT_CW: &str = "increment_cw";
    pub const INCREMENT_CCW: &str = "increment_ccw";
    pub const INCREMENT_MIN: &str = "increment_min";
    pub const INCREMENT_MAX: &str = "increment_max";
    pub const INCREMENT_CYCLE_ALLOWED: &str = "increment_cycle_allowed_check";
    pub const ENCODER_PRESS_VALUE: &str = "encoder_press_value";

    pub const VALUE_TEXT_MAPPING: &str = "encoder_value_text_mapping";
    pub const BACKGROUND_IMAGE: &str = "encoder_background_image";
    pub const TEXT_ALIGNMENT: &str = "encoder_text_alignment";
    pub const TEXT_COLOR: &str = "encoder_text_color";
    pub const FONT_SIZE: &str = "encoder_font_size";
    pub const FONT_WEIGHT: &str = "encoder_font_weight";
    pub const OPACITY: &str = "encoder_opacity";

    pub const COMPARE_MONITOR: &str = "dcs_id_compare_monitor";
    pub const COMPARE_CONDITION: &str = "dcs_id_compare_condition";
    pub const COMPARISON_VALUE: &str = "dcs_id_comparison_value";

    pub const STRING_MONITOR: &str = "dcs_id_string_monitor";
    pub const STRING_PASSTHROUGH: &str = "string_monitor_passthrough_check";
    pub const STRING_MAPPING: &str = "string_monitor_mapping";
    pub const STRING_VERTICAL_SPACING: &str = "string_monitor_vertical_spacing";
}

/// Read-only view over a context's settings object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextSettings(Map<String, Value>);

impl ContextSettings {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build from any JSON value; non-objects become empty settings
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// String value of a key, `None` when absent or empty
    pub fn get_str(&self, key: &str) -> Option<String> {
        let s = match self.0.get(key)? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    /// Same as `get_str` but yields an empty string for "not configured"
    pub fn get_str_or_empty(&self, key: &str) -> String {
        self.get_str(key).unwrap_or_default()
    }

    /// Boolean flag; absent or malformed reads as `false`
    pub fn get_bool(&self, key: &str) -> bool {
        self.get_bool_or(key, false)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.as_str() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            _ => default,
        }
    }

    pub fn get_decimal(&self, key: &str) -> Option<Decimal> {
        self.get_str(key).as_deref().and_then(parse_decimal)
    }

    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.get_str(key).as_deref().and_then(parse_integer)
    }
}

impl From<Map<String, Value>> for ContextSettings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
