//! Simulator data source
//!
//! The wire protocols (DCS-BIOS, export script) live outside this crate. Everything here
//! only needs addressed reads and string commands.

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Live simulator state as seen by the backend
pub trait SimulatorInterface {
    /// Current value of a simulator datum, if the simulator has reported one
    fn get_value_at_addr(&self, id: i32) -> Option<Decimal>;

    /// Send a command string to a simulator address
    fn send_command(&mut self, address: &str, value: &str);
}

/// A command sent to the simulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCommand {
    pub address: String,
    pub value: String,
}

/// In-memory simulator state
///
/// Records every command. Addresses registered with [`SimState::echo`] write the sent
/// value back to a datum, emulating a simulator that acknowledges the change on its
/// next export frame.
#[derive(Debug, Default)]
pub struct SimState {
    values: HashMap<i32, Decimal>,
    echoes: BTreeMap<String, i32>,
    sent: Vec<SentCommand>,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, id: i32, value: Decimal) {
        self.values.insert(id, value);
    }

    pub fn clear_value(&mut self, id: i32) {
        self.values.remove(&id);
    }

    /// Write values sent to `address` back into datum `id`
    pub fn echo(&mut self, address: impl Into<String>, id: i32) {
        self.echoes.insert(address.into(), id);
    }

    pub fn sent(&self) -> &[SentCommand] {
        &self.sent
    }

    /// Drain the command log
    pub fn take_sent(&mut self) -> Vec<SentCommand> {
        std::mem::take(&mut self.sent)
    }
}

impl SimulatorInterface for SimState {
    fn get_value_at_addr(&self, id: i32) -> Option<Decimal> {
        self.values.get(&id).copied()
    }

    fn send_command(&mut self, address: &str, value: &str) {
        debug!("Simulator command {} {}", address, value);

        if let Some(&id) = self.echoes.get(address) {
            if let Some(v) = crate::numeric::parse_decimal(value) {
                self.values.insert(id, v);
            }
        }

        self.sent.push(SentCommand {
            address: address.to_string(),
            value: value.to_string(),
        });
    }
}
