//! Per-character perception assembly.
//!
//! A character sees other living characters within a radius that grows
//! with the simulation's information symmetry, the events it took part in
//! over the last few ticks, the locations within walking range, and the
//! shared environment. Other characters' resources are only visible when
//! information symmetry is high.

use agora_types::{Character, NearbyLocation, Perception, VisibleCharacter};

use crate::tick::SimulationState;

/// Perception radius at zero information symmetry.
pub const BASE_RADIUS: f64 = 50.0;

/// Radius added per unit of information symmetry.
pub const SYMMETRY_RADIUS: f64 = 200.0;

/// Locations closer than this are listed as nearby.
pub const LOCATION_RADIUS: f64 = 150.0;

/// Information symmetry above which others' resources are visible.
pub const RESOURCE_VISIBILITY: f64 = 0.7;

/// How many ticks back recent events reach.
pub const RECENT_TICKS: u64 = 3;

/// Radius within which other characters are visible.
pub fn perception_radius(information_symmetry: f64) -> f64 {
    SYMMETRY_RADIUS.mul_add(information_symmetry, BASE_RADIUS)
}

/// Assemble what `character` perceives in `state` this tick.
pub fn perceive(character: &Character, state: &SimulationState) -> Perception {
    let symmetry = state.config.information_symmetry;
    let radius = perception_radius(symmetry);
    let show_resources = symmetry > RESOURCE_VISIBILITY;

    let nearby_characters = state
        .roster_characters()
        .filter(|other| other.alive && other.id != character.id)
        .filter_map(|other| {
            let distance = character.position.distance_to(other.position);
            (distance < radius).then(|| VisibleCharacter {
                id: other.id,
                name: other.name.clone(),
                distance,
                relationship: character.relationship(other.id),
                belief: character.memory.beliefs.get(&other.id).copied(),
                last_action: other.last_action.as_ref().map(|a| a.action_type),
                resources: show_resources.then(|| other.resources.clone()),
            })
        })
        .collect();

    // The log is appended in tick order, so the window is a suffix.
    let since = state.tick.saturating_sub(RECENT_TICKS);
    let mut recent_events: Vec<_> = state
        .events
        .iter()
        .rev()
        .take_while(|e| e.tick >= since)
        .filter(|e| e.involves(character.id))
        .cloned()
        .collect();
    recent_events.reverse();

    let nearby_locations = state
        .environment
        .locations
        .iter()
        .filter_map(|location| {
            let distance = character.position.distance_to(location.position);
            (distance < LOCATION_RADIUS).then(|| NearbyLocation {
                location: location.clone(),
                distance,
            })
        })
        .collect();

    Perception {
        tick: state.tick,
        nearby_characters,
        recent_events,
        nearby_locations,
        environment_resources: state.environment.resources.clone(),
        environment_conditions: state.environment.conditions.clone(),
        own_resources: character.resources.clone(),
    }
}
