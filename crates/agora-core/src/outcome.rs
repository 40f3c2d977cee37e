//! Applying the numeric consequences of a tick's events.
//!
//! Deltas are applied in event order, then in the order each event lists
//! them. Resource balances never drop below zero, transfers move at most
//! what the payer holds, relationships stay in `[-1, 1]`, and environment
//! pools are floored at zero. Deltas naming an unknown character are
//! ignored.

use agora_agents::adjust_relationship;
use agora_types::{Character, CharacterId, Event, OutcomeDelta};
use agora_world::environment::adjust_pool;
use tracing::debug;

use crate::tick::SimulationState;

/// Apply every delta carried by `events`.
pub fn apply_events(state: &mut SimulationState, events: &[Event]) {
    let mut applied = 0_usize;
    for delta in events.iter().flat_map(|e| e.deltas.iter()) {
        apply_delta(state, delta);
        applied = applied.saturating_add(1);
    }
    debug!(tick = state.tick, applied, "Outcome deltas applied");
}

/// Apply a single delta.
pub fn apply_delta(state: &mut SimulationState, delta: &OutcomeDelta) {
    match delta {
        OutcomeDelta::Resource {
            character,
            resource,
            amount,
        } => {
            if let Some(c) = state.characters.get_mut(character) {
                add_resource(c, resource, *amount);
            }
        }
        OutcomeDelta::Transfer {
            from,
            to,
            resource,
            amount,
        } => transfer(state, *from, *to, resource, *amount),
        OutcomeDelta::Relationship {
            from,
            toward,
            amount,
        } => {
            if let Some(c) = state.characters.get_mut(from) {
                adjust_relationship(c, *toward, *amount);
            }
        }
        OutcomeDelta::EnvironmentResource { resource, amount } => {
            adjust_pool(&mut state.environment, resource, *amount);
        }
        OutcomeDelta::Relocate {
            character,
            position,
        } => {
            if let Some(c) = state.characters.get_mut(character) {
                c.position = *position;
            }
        }
    }
}

fn add_resource(character: &mut Character, resource: &str, amount: f64) {
    let balance = character.resource(resource);
    character
        .resources
        .insert(resource.to_owned(), (balance + amount).max(0.0));
}

fn transfer(
    state: &mut SimulationState,
    from: CharacterId,
    to: CharacterId,
    resource: &str,
    amount: f64,
) {
    if from == to || !state.characters.contains_key(&to) {
        return;
    }
    let Some(payer) = state.characters.get_mut(&from) else {
        return;
    };
    let moved = amount.min(payer.resource(resource)).max(0.0);
    add_resource(payer, resource, -moved);
    if let Some(payee) = state.characters.get_mut(&to) {
        add_resource(payee, resource, moved);
    }
}
