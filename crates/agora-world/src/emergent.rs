//! Detection of system-level patterns in a tick's events and state.
//!
//! Five detectors run independently and may all fire on the same tick:
//! coalitions in this tick's alliance graph, critically low resource pools,
//! a single dominant character, collapsed average trust, and escalating
//! violence. The resource-crisis detector also flips the environment's
//! scarcity condition to `severe`.

use std::collections::{BTreeMap, BTreeSet};

use agora_types::{Character, CharacterId, Environment, Event, EventKind, EventType};
use tracing::info;

use crate::environment::SCARCITY;

/// Smallest connected alliance group reported as a coalition.
pub const COALITION_MIN_SIZE: usize = 3;
/// Pools below this level trigger a crisis.
pub const CRISIS_THRESHOLD: f64 = 15.0;
/// A character dominates when its total exceeds this multiple of the mean.
pub const DOMINANCE_RATIO: f64 = 2.5;
/// Mean trust below this level is a trust collapse.
pub const TRUST_COLLAPSE_THRESHOLD: f64 = -0.3;
/// Number of conflict events in one tick that counts as escalation.
pub const ESCALATION_CONFLICTS: usize = 3;

/// Run every detector.
///
/// `roster` is every character in insertion order; dead characters are
/// ignored. `tick_events` are this tick's interaction and environmental
/// events.
pub fn detect_emergent_events(
    roster: &[&Character],
    environment: &mut Environment,
    tick_events: &[Event],
    tick: u64,
) -> Vec<Event> {
    let living: Vec<&Character> = roster.iter().copied().filter(|c| c.alive).collect();
    let everyone: Vec<CharacterId> = living.iter().map(|c| c.id).collect();

    let mut emergent = Vec::new();
    emergent.extend(detect_coalitions(&living, tick_events, tick));
    emergent.extend(detect_resource_crises(environment, &everyone, tick));
    emergent.extend(detect_dominance(&living, &everyone, tick));
    emergent.extend(detect_trust_collapse(&living, &everyone, tick));
    emergent.extend(detect_escalation(tick_events, &everyone, tick));

    for event in &emergent {
        info!(tick, title = %event.title, "Emergent event detected");
    }
    emergent
}

// ---------------------------------------------------------------------------
// Coalitions
// ---------------------------------------------------------------------------

/// Connected components of size three or more in the graph whose edges are
/// this tick's alliance-formed events.
fn detect_coalitions(living: &[&Character], tick_events: &[Event], tick: u64) -> Vec<Event> {
    let mut adjacency: BTreeMap<CharacterId, BTreeSet<CharacterId>> = BTreeMap::new();
    let mut discovery_order: Vec<CharacterId> = Vec::new();
    for event in tick_events
        .iter()
        .filter(|e| e.event_type == EventType::AllianceFormed)
    {
        for member in &event.participants {
            if !adjacency.contains_key(member) {
                discovery_order.push(*member);
            }
            adjacency
                .entry(*member)
                .or_default()
                .extend(event.participants.iter().copied());
        }
    }

    let roster_rank: BTreeMap<CharacterId, usize> = living
        .iter()
        .enumerate()
        .map(|(rank, c)| (c.id, rank))
        .collect();
    let names: BTreeMap<CharacterId, &str> =
        living.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut visited: BTreeSet<CharacterId> = BTreeSet::new();
    let mut events = Vec::new();
    for start in discovery_order {
        if visited.contains(&start) {
            continue;
        }
        let mut group = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            group.push(current);
            if let Some(neighbors) = adjacency.get(&current) {
                stack.extend(neighbors.iter().filter(|n| !visited.contains(*n)));
            }
        }
        if group.len() < COALITION_MIN_SIZE {
            continue;
        }
        group.sort_by_key(|id| roster_rank.get(id).copied().unwrap_or(usize::MAX));
        let member_names: Vec<&str> = group
            .iter()
            .filter_map(|id| names.get(id).copied())
            .collect();
        events.push(
            Event::new(
                tick,
                EventKind::Coalition,
                "Coalition formed",
                format!(
                    "A powerful coalition has emerged among {}. Their combined influence reshapes the balance of power.",
                    member_names.join(", ")
                ),
            )
            .with_participants(group)
            .with_outcomes(vec![
                "Power balance shifts".to_owned(),
                "Non-members may feel threatened".to_owned(),
            ])
            .with_importance(0.85),
        );
    }
    events
}

// ---------------------------------------------------------------------------
// Resource crisis
// ---------------------------------------------------------------------------

fn detect_resource_crises(
    environment: &mut Environment,
    everyone: &[CharacterId],
    tick: u64,
) -> Vec<Event> {
    let events: Vec<Event> = environment
        .resources
        .iter()
        .filter(|(_, amount)| **amount < CRISIS_THRESHOLD)
        .map(|(resource, amount)| {
            Event::new(
                tick,
                EventKind::ResourceCrisis,
                format!("Crisis: {resource} shortage"),
                format!(
                    "{resource} has dropped to a critical level ({amount:.0}). Desperation and conflict are likely."
                ),
            )
            .with_participants(everyone.to_vec())
            .with_outcomes(vec![format!("{resource} scarcity intensifies competition")])
            .with_importance(0.9)
        })
        .collect();
    if !events.is_empty() {
        environment
            .conditions
            .insert(SCARCITY.to_owned(), "severe".to_owned());
    }
    events
}

// ---------------------------------------------------------------------------
// Dominance
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn detect_dominance(living: &[&Character], everyone: &[CharacterId], tick: u64) -> Option<Event> {
    if living.len() < 2 {
        return None;
    }
    let mut richest: Option<(&Character, f64)> = None;
    let mut sum = 0.0;
    for &character in living {
        let total = character.total_resources();
        sum += total;
        if richest.is_none_or(|(_, best)| total > best) {
            richest = Some((character, total));
        }
    }
    let mean = sum / living.len() as f64;
    let (dominant, max) = richest?;
    if mean <= 0.0 || max <= mean * DOMINANCE_RATIO {
        return None;
    }
    Some(
        Event::new(
            tick,
            EventKind::Dominance,
            format!("{} dominates", dominant.name),
            format!(
                "{} has accumulated far more resources than anyone else, creating a power imbalance.",
                dominant.name
            ),
        )
        .with_participants(everyone.to_vec())
        .with_outcomes(vec![
            format!("{} holds disproportionate power", dominant.name),
            "Others may unite against them".to_owned(),
        ])
        .with_importance(0.8),
    )
}

// ---------------------------------------------------------------------------
// Trust collapse and escalation
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn detect_trust_collapse(
    living: &[&Character],
    everyone: &[CharacterId],
    tick: u64,
) -> Option<Event> {
    if living.is_empty() {
        return None;
    }
    let mean = living
        .iter()
        .map(|c| c.emotional_state.trust)
        .sum::<f64>()
        / living.len() as f64;
    (mean < TRUST_COLLAPSE_THRESHOLD).then(|| {
        Event::new(
            tick,
            EventKind::TrustCollapse,
            "Era of suspicion",
            "Trust has collapsed across the community. Everyone watches their back.",
        )
        .with_participants(everyone.to_vec())
        .with_outcomes(vec![
            "Cooperation becomes nearly impossible".to_owned(),
            "Betrayals become more likely".to_owned(),
        ])
        .with_importance(0.75)
    })
}

fn detect_escalation(tick_events: &[Event], everyone: &[CharacterId], tick: u64) -> Option<Event> {
    let conflicts = tick_events
        .iter()
        .filter(|e| e.event_type == EventType::Conflict)
        .count();
    (conflicts >= ESCALATION_CONFLICTS).then(|| {
        Event::new(
            tick,
            EventKind::Escalation,
            "Escalating violence",
            "Multiple conflicts have erupted. The situation is spiraling toward all-out war.",
        )
        .with_participants(everyone.to_vec())
        .with_outcomes(vec![
            "Fear spreads".to_owned(),
            "Alliances become crucial for survival".to_owned(),
        ])
        .with_importance(0.85)
    })
}
