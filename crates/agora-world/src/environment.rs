//! The shared environment and its per-tick drift.
//!
//! Each tick draws from one stream seeded by `("env", tick)`:
//!
//! | Roll | Probability | Effect |
//! |------|-------------|--------|
//! | Fluctuation | `0.15 * randomness` | one pool moves by `uniform(-15, 20)` |
//! | Weather | `0.1 * randomness` | weather resampled, event only on change |
//! | Discovery | `0.05 * randomness` | a mysterious discovery event |
//!
//! After the rolls every pool drains by `resource_scarcity * uniform(0.5, 2.0)`.
//! Pools never go below zero.

use std::collections::BTreeMap;

use agora_types::{CharacterId, Environment, Event, EventKind, Location, Position, SimulationConfig};
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::seed::{SeedMix, uniform};

/// Weather states the environment can shift between.
pub const WEATHER_OPTIONS: [&str; 6] = ["calm", "stormy", "harsh", "pleasant", "foggy", "scorching"];

/// Condition key holding the current weather.
pub const WEATHER: &str = "weather";

/// Condition key holding the current scarcity level.
pub const SCARCITY: &str = "scarcity";

// ---------------------------------------------------------------------------
// Starting environment
// ---------------------------------------------------------------------------

/// The Commons: four resource pools, calm conditions, five locations.
pub fn default_environment() -> Environment {
    let resources = BTreeMap::from([
        ("food".to_owned(), 100.0),
        ("shelter".to_owned(), 100.0),
        ("territory".to_owned(), 100.0),
        ("knowledge".to_owned(), 50.0),
    ]);
    let conditions = BTreeMap::from([
        (WEATHER.to_owned(), "calm".to_owned()),
        ("stability".to_owned(), "peaceful".to_owned()),
        (SCARCITY.to_owned(), "moderate".to_owned()),
    ]);
    let locations = [
        ("Market Square", 0.0, 0.0, "trade"),
        ("The Arena", 100.0, 0.0, "conflict"),
        ("Council Hall", 0.0, 100.0, "diplomacy"),
        ("Wilderness", -100.0, -100.0, "exploration"),
        ("Library", 50.0, 50.0, "knowledge"),
    ]
    .into_iter()
    .map(|(name, x, y, kind)| Location {
        name: name.to_owned(),
        position: Position::new(x, y),
        kind: kind.to_owned(),
    })
    .collect();

    Environment {
        name: "The Commons".to_owned(),
        description: "A shared space where characters interact and compete for resources."
            .to_owned(),
        resources,
        conditions,
        locations,
    }
}

// ---------------------------------------------------------------------------
// Per-tick drift
// ---------------------------------------------------------------------------

/// Roll this tick's environmental events and apply the scarcity drain.
///
/// Mutates `environment` in place. Every returned event lists
/// `participants` as its participants.
pub fn generate_environmental_events(
    environment: &mut Environment,
    config: &SimulationConfig,
    participants: &[CharacterId],
    tick: u64,
) -> Vec<Event> {
    let mut rng = SeedMix::new(config.seed, "env").tick(tick).rng();
    let randomness = config.randomness;
    let mut events = Vec::new();

    if uniform(&mut rng, 0.0, 1.0) < 0.15 * randomness {
        let names: Vec<String> = environment.resources.keys().cloned().collect();
        let picked = names.choose(&mut rng).cloned();
        let change = uniform(&mut rng, -15.0, 20.0);
        if let Some(resource) = picked {
            let old = environment.resources.get(&resource).copied().unwrap_or(0.0);
            let new = (old + change).max(0.0);
            environment.resources.insert(resource.clone(), new);
            let (title, verb) = if change > 0.0 {
                (format!("Abundance of {resource}"), "increased")
            } else {
                (format!("Scarcity of {resource}"), "reduced")
            };
            events.push(
                Event::new(
                    tick,
                    EventKind::ResourceFluctuation,
                    title,
                    format!(
                        "Environmental conditions have {verb} {resource} supply from {old:.0} to {new:.0}."
                    ),
                )
                .with_participants(participants.to_vec())
                .with_outcomes(vec![format!("{resource} changed by {change:+.0}")])
                .with_importance(0.4 + change.abs() / 40.0),
            );
        }
    }

    if uniform(&mut rng, 0.0, 1.0) < 0.1 * randomness {
        let new_weather = WEATHER_OPTIONS.choose(&mut rng).copied().unwrap_or("calm");
        let old_weather = environment
            .conditions
            .get(WEATHER)
            .cloned()
            .unwrap_or_else(|| "calm".to_owned());
        if new_weather != old_weather {
            environment
                .conditions
                .insert(WEATHER.to_owned(), new_weather.to_owned());
            events.push(
                Event::new(
                    tick,
                    EventKind::WeatherShift,
                    format!("Weather shifts to {new_weather}"),
                    format!(
                        "The weather changes from {old_weather} to {new_weather}, affecting all inhabitants."
                    ),
                )
                .with_participants(participants.to_vec())
                .with_outcomes(vec![format!("Weather is now {new_weather}")])
                .with_importance(0.3),
            );
        }
    }

    if uniform(&mut rng, 0.0, 1.0) < 0.05 * randomness {
        events.push(
            Event::new(
                tick,
                EventKind::MysteriousDiscovery,
                "A mysterious discovery",
                "Something unusual has been found in the environment, sparking curiosity and tension.",
            )
            .with_participants(participants.to_vec())
            .with_outcomes(vec!["New opportunities and dangers emerge".to_owned()])
            .with_importance(0.7),
        );
    }

    let scarcity = config.resource_scarcity;
    if scarcity > 0.0 {
        for amount in environment.resources.values_mut() {
            let drain = scarcity * uniform(&mut rng, 0.5, 2.0);
            *amount = (*amount - drain).max(0.0);
        }
    }

    debug!(tick, events = events.len(), "Environment drifted");
    events
}

/// Add `amount` to a pool, flooring at zero. Unknown pools are created.
pub fn adjust_pool(environment: &mut Environment, resource: &str, amount: f64) {
    let pool = environment
        .resources
        .entry(resource.to_owned())
        .or_insert(0.0);
    *pool = (*pool + amount).max(0.0);
}
