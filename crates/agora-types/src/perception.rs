//! Perception payload assembled for a character before it decides.
//!
//! A perception is everything a character knows this tick. Anything not in
//! it, including other characters' resources under low information
//! symmetry, does not influence the decision.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, Belief};
use crate::ids::CharacterId;
use crate::structs::{Event, Location};

/// Another living character within perception range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VisibleCharacter {
    /// Who it is.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Distance from the perceiver.
    pub distance: f64,
    /// The perceiver's relationship toward them.
    pub relationship: f64,
    /// The perceiver's belief about them.
    pub belief: Option<Belief>,
    /// What they did last tick.
    pub last_action: Option<ActionType>,
    /// Their resources, only under high information symmetry.
    pub resources: Option<BTreeMap<String, f64>>,
}

/// A location within walking range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NearbyLocation {
    /// The location.
    pub location: Location,
    /// Distance from the perceiver.
    pub distance: f64,
}

/// The full perception of one character for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Perception {
    /// Current tick.
    pub tick: u64,
    /// Visible characters, in roster order.
    pub nearby_characters: Vec<VisibleCharacter>,
    /// Events from the last three ticks the perceiver took part in.
    pub recent_events: Vec<Event>,
    /// Locations within range.
    pub nearby_locations: Vec<NearbyLocation>,
    /// Shared pool levels.
    pub environment_resources: BTreeMap<String, f64>,
    /// Environment condition flags.
    pub environment_conditions: BTreeMap<String, String>,
    /// The perceiver's own balances.
    pub own_resources: BTreeMap<String, f64>,
}
