use tracing::{debug, info, warn};

use crate::actions::KeyEvent;
use crate::context::StreamdeckContext;
use crate::device::DeviceSink;
use crate::settings::ContextSettings;
use crate::sim::SimulatorInterface;

use super::DeckEvent;

/// Routes device events to the contexts they belong to
///
/// Contexts are kept in the order they appeared, which is also the order they are
/// updated each tick.
#[derive(Default)]
pub struct InputHandler {
    contexts: Vec<StreamdeckContext>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contexts(&self) -> &[StreamdeckContext] {
        &self.contexts
    }

    pub fn get(&self, context: &str) -> Option<&StreamdeckContext> {
        self.contexts.iter().find(|c| c.id() == context)
    }

    fn get_mut(&mut self, context: &str) -> Option<&mut StreamdeckContext> {
        self.contexts.iter_mut().find(|c| c.id() == context)
    }

    /// Handle an event from the device
    pub fn handle_event(
        &mut self,
        event: DeckEvent,
        sim: &mut dyn SimulatorInterface,
        sink: &mut dyn DeviceSink,
    ) {
        match event {
            DeckEvent::WillAppear {
                context,
                action,
                settings,
            } => self.add_context(&context, &action, settings),
            DeckEvent::WillDisappear { context } => {
                let before = self.contexts.len();
                self.contexts.retain(|c| c.id() != context);
                if self.contexts.len() == before {
                    debug!("Disappear for unknown context {}", context);
                } else {
                    info!("Removed context {}", context);
                }
            }
            event => {
                let Some(ctx) = self.get_mut(event.context()) else {
                    warn!("Ignoring event for unknown context: {:?}", event);
                    return;
                };
                match event {
                    DeckEvent::DidReceiveSettings { settings, .. } => {
                        debug!("Settings replaced for {}", ctx.id());
                        ctx.update_settings(settings);
                    }
                    DeckEvent::KeyDown { .. } => {
                        ctx.handle_button_pressed(sim, sink, KeyEvent::default())
                    }
                    DeckEvent::KeyUp { state, .. } => {
                        ctx.handle_button_released(sim, sink, KeyEvent { state })
                    }
                    DeckEvent::DialRotate { ticks, .. } => {
                        ctx.handle_encoder_rotation(sim, sink, ticks)
                    }
                    DeckEvent::DialPress { .. } => ctx.handle_encoder_press(sim, sink),
                    DeckEvent::WillAppear { .. } | DeckEvent::WillDisappear { .. } => {}
                }
            }
        }
    }

    /// Update every context from the current simulator state
    pub fn tick(&mut self, sim: &dyn SimulatorInterface, sink: &mut dyn DeviceSink) {
        for ctx in &mut self.contexts {
            ctx.update_state(sim, sink);
        }
    }

    /// Create a context, replacing any previous one with the same id
    fn add_context(&mut self, context: &str, action: &str, settings: ContextSettings) {
        let Some(ctx) = StreamdeckContext::new(action, context, settings) else {
            warn!("Unsupported action '{}' for context {}", action, context);
            return;
        };

        match self.contexts.iter().position(|c| c.id() == context) {
            Some(index) => {
                debug!("Context {} re-appeared, replacing", context);
                self.contexts[index] = ctx;
            }
            None => {
                info!("Added {} context {}", action, context);
                self.contexts.push(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RecordingSink;
    use crate::sim::SimState;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn appear(context: &str, action: &str, settings: serde_json::Value) -> DeckEvent {
        DeckEvent::WillAppear {
            context: context.to_string(),
            action: action.to_string(),
            settings: ContextSettings::from_value(settings),
        }
    }

    #[test]
    fn test_appear_and_disappear() {
        let mut handler = InputHandler::new();
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();

        handler.handle_event(appear("a", "com.ctytler.dcs.encoder", json!({})), &mut sim, &mut sink);
        handler.handle_event(appear("b", "com.ctytler.dcs.momentary.button", json!({})), &mut sim, &mut sink);
        handler.handle_event(appear("c", "com.example.unknown", json!({})), &mut sim, &mut sink);

        let ids: Vec<&str> = handler.contexts().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        handler.handle_event(
            DeckEvent::WillDisappear { context: "a".to_string() },
            &mut sim,
            &mut sink,
        );
        assert!(handler.get("a").is_none());
        assert!(handler.get("b").is_some());
    }

    #[test]
    fn test_reappear_replaces_in_place() {
        let mut handler = InputHandler::new();
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();

        handler.handle_event(appear("a", "com.ctytler.dcs.encoder", json!({})), &mut sim, &mut sink);
        handler.handle_event(appear("b", "com.ctytler.dcs.encoder", json!({})), &mut sim, &mut sink);
        handler.handle_event(
            appear("a", "com.ctytler.dcs.switch2pos.button", json!({ "send_address": "1,1" })),
            &mut sim,
            &mut sink,
        );

        assert_eq!(handler.contexts().len(), 2);
        assert_eq!(handler.contexts()[0].id(), "a");
        assert_eq!(handler.contexts()[0].action_uuid(), "com.ctytler.dcs.switch2pos.button");
    }

    #[test]
    fn test_routes_key_and_dial_events() {
        let mut handler = InputHandler::new();
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();

        handler.handle_event(
            appear(
                "key",
                "com.ctytler.dcs.momentary.button",
                json!({ "send_address": "25,3001", "press_value": "1", "release_value": "0" }),
            ),
            &mut sim,
            &mut sink,
        );
        handler.handle_event(
            appear(
                "dial",
                "com.ctytler.dcs.encoder",
                json!({
                    "send_address": "25,3002",
                    "increment_cw": "1",
                    "increment_ccw": "-1",
                    "increment_min": "0",
                    "increment_max": "10",
                }),
            ),
            &mut sim,
            &mut sink,
        );

        handler.handle_event(DeckEvent::KeyDown { context: "key".to_string() }, &mut sim, &mut sink);
        handler.handle_event(
            DeckEvent::KeyUp { context: "key".to_string(), state: 0 },
            &mut sim,
            &mut sink,
        );
        handler.handle_event(
            DeckEvent::DialRotate { context: "dial".to_string(), ticks: 3 },
            &mut sim,
            &mut sink,
        );
        handler.handle_event(
            DeckEvent::KeyDown { context: "missing".to_string() },
            &mut sim,
            &mut sink,
        );

        let sent: Vec<(String, String)> = sim
            .take_sent()
            .into_iter()
            .map(|c| (c.address, c.value))
            .collect();
        assert_eq!(
            sent,
            vec![
                ("25,3001".to_string(), "1".to_string()),
                ("25,3001".to_string(), "0".to_string()),
                ("25,3002".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_settings_event_reaches_context() {
        let mut handler = InputHandler::new();
        let mut sim = SimState::new();
        let mut sink = RecordingSink::new();
        sim.set_value(7, dec!(2));

        handler.handle_event(appear("a", "com.ctytler.dcs.encoder", json!({})), &mut sim, &mut sink);
        handler.handle_event(
            DeckEvent::DidReceiveSettings {
                context: "a".to_string(),
                settings: ContextSettings::from_value(json!({ "dcs_id_string_monitor": "7" })),
            },
            &mut sim,
            &mut sink,
        );
        handler.tick(&sim, &mut sink);

        assert_eq!(sink.titles(), vec!["2"]);
    }

    #[test]
    fn test_event_deserializes_from_tagged_table() {
        let event: DeckEvent = serde_json::from_value(json!({
            "event": "dial_rotate",
            "context": "dial",
            "ticks": -2,
        }))
        .unwrap();
        assert_eq!(
            event,
            DeckEvent::DialRotate {
                context: "dial".to_string(),
                ticks: -2
            }
        );

        let event: DeckEvent =
            serde_json::from_value(json!({ "event": "key_up", "context": "k" })).unwrap();
        assert_eq!(event, DeckEvent::KeyUp { context: "k".to_string(), state: 0 });
    }
}
