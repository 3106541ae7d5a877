pub mod actions;
pub mod config;
pub mod context;
pub mod device;
pub mod display;
pub mod increment;
pub mod input;
pub mod mapping;
pub mod numeric;
pub mod scenario;
pub mod settings;
pub mod sim;

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info};

use config::Config;
use device::{ConsoleSink, DeviceSink};
use input::{DeckEvent, InputHandler};
use scenario::{Scenario, SimUpdate};
use sim::SimState;

/// Main application struct
///
/// Drives a scenario against the in-memory simulator: each step applies simulator values,
/// dispatches device events, then updates every context once.
pub struct App<S: DeviceSink = ConsoleSink> {
    config: Config,
    scenario: Scenario,
    sim: SimState,
    input: InputHandler,
    sink: S,
    next_step: usize,
}

impl<S: DeviceSink> App<S> {
    /// Create a new application instance with the scenario's contexts placed
    pub fn new(config: Config, scenario: Scenario, sink: S) -> Self {
        let mut sim = SimState::new();
        if config.replay.echo_commands {
            for (address, id) in &scenario.echo {
                sim.echo(address.clone(), *id);
            }
        }

        let mut app = Self {
            config,
            scenario,
            sim,
            input: InputHandler::new(),
            sink,
            next_step: 0,
        };

        let appear: Vec<DeckEvent> = app.scenario.contexts.iter().map(|c| c.to_event()).collect();
        for event in appear {
            app.handle_event(event);
        }
        app
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimState {
        &mut self.sim
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn is_finished(&self) -> bool {
        self.next_step >= self.scenario.steps.len()
    }

    /// Route a device event to its context
    pub fn handle_event(&mut self, event: DeckEvent) {
        debug!("Event: {:?}", event);
        self.input.handle_event(event, &mut self.sim, &mut self.sink);
    }

    /// One polling tick over all contexts
    pub fn tick(&mut self) {
        self.input.tick(&self.sim, &mut self.sink);
    }

    /// Run the next scenario step; returns false once every step has run
    pub fn step(&mut self) -> Result<bool> {
        let Some(step) = self.scenario.steps.get(self.next_step).cloned() else {
            return Ok(false);
        };
        let index = self.next_step;
        self.next_step += 1;

        for update in step.updates(index)? {
            match update {
                SimUpdate::Set(id, value) => self.sim.set_value(id, value),
                SimUpdate::Clear(id) => self.sim.clear_value(id),
            }
        }
        for event in step.events {
            self.handle_event(event);
        }
        self.tick();
        Ok(true)
    }

    /// Run the main loop - one scenario step per polling interval
    pub async fn run(&mut self) -> Result<()> {
        let period = Duration::from_millis(self.config.polling.interval_ms.max(1));
        info!(
            "Replaying {} steps for {} contexts every {:?}",
            self.scenario.steps.len(),
            self.input.contexts().len(),
            period
        );

        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if !self.step()? {
                break;
            }
        }

        info!("Scenario complete");
        Ok(())
    }

    /// Gracefully shutdown the application
    pub async fn shutdown(&mut self) {
        info!("Shutting down dcs-deck...");
        info!(
            "Ran {} of {} steps, {} commands sent",
            self.next_step,
            self.scenario.steps.len(),
            self.sim.sent().len()
        );
        info!("Shutdown complete");
    }
}
