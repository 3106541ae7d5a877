//! Replay scripts
//!
//! A scenario declares the placed contexts, optional command echoes and a list of steps.
//! Each step sets simulator values, dispatches device events and then runs one tick.
//!
//! ```toml
//! [echo]
//! "25,3001" = 100
//!
//! [[contexts]]
//! id = "dial"
//! action = "com.ctytler.dcs.encoder"
//! settings = { send_address = "25,3001", dcs_id_increment_monitor = "100" }
//!
//! [[steps]]
//! values = { "100" = "0.5" }
//! events = [{ event = "dial_rotate", context = "dial", ticks = 1 }]
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::actions::ActionKind;
use crate::input::DeckEvent;
use crate::numeric::{parse_decimal, parse_integer};
use crate::settings::ContextSettings;

/// Errors found while loading a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Context '{0}' is declared more than once")]
    DuplicateContext(String),

    #[error("Context '{context}' uses unsupported action '{action}'")]
    UnsupportedAction { context: String, action: String },

    #[error("Step {step}: invalid simulator id '{id}'")]
    InvalidId { step: usize, id: String },

    #[error("Step {step}: invalid value for simulator id {id}")]
    InvalidValue { step: usize, id: i32 },

    #[error("Step {step}: event for unknown context '{context}'")]
    UnknownContext { step: usize, context: String },
}

/// Parsed replay script
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub contexts: Vec<ContextSpec>,
    /// Send address -> simulator id acknowledging the command
    #[serde(default)]
    pub echo: BTreeMap<String, i32>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextSpec {
    pub id: String,
    pub action: String,
    #[serde(default)]
    pub settings: ContextSettings,
}

impl ContextSpec {
    pub fn to_event(&self) -> DeckEvent {
        DeckEvent::WillAppear {
            context: self.id.clone(),
            action: self.action.clone(),
            settings: self.settings.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    /// Simulator id -> value; an empty string clears the value
    #[serde(default)]
    pub values: BTreeMap<String, RawValue>,
    #[serde(default)]
    pub events: Vec<DeckEvent>,
}

/// Simulator value as written in the script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// A change to apply to the simulator before a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimUpdate {
    Set(i32, Decimal),
    Clear(i32),
}

impl Step {
    /// Resolve the step's values; `index` is only used for error reporting
    pub fn updates(&self, index: usize) -> Result<Vec<SimUpdate>, ScenarioError> {
        self.values
            .iter()
            .map(|(id, raw)| {
                let id = parse_integer(id.trim()).ok_or_else(|| ScenarioError::InvalidId {
                    step: index,
                    id: id.clone(),
                })?;
                let value = match raw {
                    RawValue::Text(s) if s.trim().is_empty() => return Ok(SimUpdate::Clear(id)),
                    RawValue::Text(s) => parse_decimal(s),
                    RawValue::Integer(i) => Some(Decimal::from(*i)),
                    RawValue::Float(f) => Decimal::try_from(*f).ok(),
                };
                value
                    .map(|v| SimUpdate::Set(id, v))
                    .ok_or(ScenarioError::InvalidValue { step: index, id })
            })
            .collect()
    }
}

impl Scenario {
    /// Load and validate a scenario file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate scenario text
    pub fn parse(contents: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = toml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check ids, values, actions and event targets
    ///
    /// Contexts created by a `will_appear` event count from that step on, and stop counting
    /// after `will_disappear`.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let mut live = HashSet::new();
        for declared in &self.contexts {
            check_action(&declared.id, &declared.action)?;
            if !live.insert(declared.id.as_str()) {
                return Err(ScenarioError::DuplicateContext(declared.id.clone()));
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            step.updates(index)?;

            for event in &step.events {
                match event {
                    DeckEvent::WillAppear {
                        context, action, ..
                    } => {
                        check_action(context, action)?;
                        live.insert(context.as_str());
                    }
                    DeckEvent::WillDisappear { context } => {
                        live.remove(context.as_str());
                    }
                    other if !live.contains(other.context()) => {
                        return Err(ScenarioError::UnknownContext {
                            step: index,
                            context: other.context().to_string(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Total number of events across all steps
    pub fn event_count(&self) -> usize {
        self.steps.iter().map(|s| s.events.len()).sum()
    }
}

fn check_action(context: &str, action: &str) -> Result<(), ScenarioError> {
    match ActionKind::from_uuid(action) {
        Some(_) => Ok(()),
        None => Err(ScenarioError::UnsupportedAction {
            context: context.to_string(),
            action: action.to_string(),
        }),
    }
}
