//! Tick callback that reports progress through `tracing`.
//!
//! Every tick gets one summary line. Emergent events are logged at `info`
//! as they happen; everything else goes to `debug`.

use std::collections::BTreeMap;

use agora_core::{SimulationState, TickCallback, TickSummary};
use agora_types::{ActionType, EventType};
use agora_world::environment::WEATHER;
use tracing::{debug, info};

/// Callback that logs each tick and keeps running totals.
#[derive(Debug, Default)]
pub struct LoggingCallback {
    /// Events seen so far, by coarse type.
    totals: BTreeMap<EventType, u64>,
}

impl LoggingCallback {
    /// A callback with empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events seen so far, by coarse type.
    pub const fn totals(&self) -> &BTreeMap<EventType, u64> {
        &self.totals
    }
}

impl TickCallback for LoggingCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        let mut actions: BTreeMap<ActionType, u32> = BTreeMap::new();
        for action in summary.decisions.values() {
            let count = actions.entry(action.action_type).or_insert(0);
            *count = count.saturating_add(1);
        }

        for event in &summary.events {
            let total = self.totals.entry(event.event_type).or_insert(0);
            *total = total.saturating_add(1);

            if event.event_type == EventType::Emergent {
                info!(
                    tick = summary.tick,
                    kind = ?event.kind,
                    title = %event.title,
                    participants = event.participants.len(),
                    "Emergent event"
                );
            } else {
                debug!(
                    tick = summary.tick,
                    kind = ?event.kind,
                    title = %event.title,
                    "Event"
                );
            }
        }

        info!(
            tick = summary.tick,
            characters_alive = summary.characters_alive,
            events = summary.events.len(),
            actions = ?actions,
            weather = state.environment.conditions.get(WEATHER).map(String::as_str),
            total_events = state.events.len(),
            "Tick summary"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use agora_core::{UtilityDecisionSource, run_simulation};
    use agora_types::{Character, CharacterId, PersonalityTraits, SimulationConfig};

    use super::*;

    #[test]
    fn totals_match_the_event_log() {
        let mut state = SimulationState::new(SimulationConfig {
            max_ticks: 6,
            seed: 2,
            ..SimulationConfig::default()
        });
        for name in ["Ada", "Bram", "Cleo"] {
            state.add_character(Character::new(
                CharacterId::new(),
                name,
                PersonalityTraits::default(),
            ));
        }

        let mut callback = LoggingCallback::new();
        run_simulation(&mut state, &mut UtilityDecisionSource, &mut callback);

        let counted: u64 = callback.totals().values().sum();
        assert_eq!(counted, u64::try_from(state.events.len()).unwrap());
    }
}
