//! Key state and title derived from simulator values

use rust_decimal::Decimal;

use crate::mapping::parse_value_mapping;
use crate::numeric::canonical;
use crate::settings::{keys, ContextSettings};
use crate::sim::SimulatorInterface;

/// Comparison between a monitored value and the configured comparison value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareCondition {
    EqualTo,
    LessThan,
    GreaterThan,
}

impl CompareCondition {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EQUAL_TO" => Some(CompareCondition::EqualTo),
            "LESS_THAN" => Some(CompareCondition::LessThan),
            "GREATER_THAN" => Some(CompareCondition::GreaterThan),
            _ => None,
        }
    }

    fn holds(self, value: Decimal, reference: Decimal) -> bool {
        match self {
            CompareCondition::EqualTo => value == reference,
            CompareCondition::LessThan => value < reference,
            CompareCondition::GreaterThan => value > reference,
        }
    }
}

/// Picks key state 1 when the monitored value satisfies the condition, 0 otherwise
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonMonitor {
    rule: Option<(i32, CompareCondition, Decimal)>,
}

impl ComparisonMonitor {
    pub fn from_settings(settings: &ContextSettings) -> Self {
        Self {
            rule: Self::parse_rule(settings),
        }
    }

    fn parse_rule(settings: &ContextSettings) -> Option<(i32, CompareCondition, Decimal)> {
        Some((
            settings.get_integer(keys::COMPARE_MONITOR)?,
            CompareCondition::parse(&settings.get_str(keys::COMPARE_CONDITION)?)?,
            settings.get_decimal(keys::COMPARISON_VALUE)?,
        ))
    }

    pub fn is_configured(&self) -> bool {
        self.rule.is_some()
    }

    pub fn determine_state(&self, sim: &dyn SimulatorInterface) -> u32 {
        let Some((id, condition, reference)) = self.rule else {
            return 0;
        };
        match sim.get_value_at_addr(id) {
            Some(value) if condition.holds(value, reference) => 1,
            _ => 0,
        }
    }
}

/// Title text following a monitored value
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMonitor {
    id: Option<i32>,
    passthrough: bool,
    mapping: String,
    vertical_spacing: i32,
}

impl Default for TitleMonitor {
    fn default() -> Self {
        Self {
            id: None,
            passthrough: true,
            mapping: String::new(),
            vertical_spacing: 0,
        }
    }
}

impl TitleMonitor {
    pub fn from_settings(settings: &ContextSettings) -> Self {
        Self {
            id: settings.get_integer(keys::STRING_MONITOR),
            passthrough: settings.get_bool_or(keys::STRING_PASSTHROUGH, true),
            mapping: settings.get_str_or_empty(keys::STRING_MAPPING),
            vertical_spacing: settings.get_integer(keys::STRING_VERTICAL_SPACING).unwrap_or(0),
        }
    }

    /// Title for the current value; empty when unconfigured or unavailable
    pub fn determine_title(&self, sim: &dyn SimulatorInterface) -> String {
        let Some(value) = self.id.and_then(|id| sim.get_value_at_addr(id)) else {
            return String::new();
        };

        let value = canonical(&value);
        let text = match parse_value_mapping(&self.mapping, &value) {
            Some(entry) => entry.text,
            None if self.passthrough => value,
            None => return String::new(),
        };

        let padding = "\n".repeat(self.vertical_spacing.unsigned_abs() as usize);
        if self.vertical_spacing >= 0 {
            padding + &text
        } else {
            text + &padding
        }
    }
}
