//! Structured numeric consequences of resolved events.
//!
//! Resolvers never mutate state directly. They attach [`OutcomeDelta`]s to
//! the events they emit, and the engine applies every delta in event order
//! once resolution is complete.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::CharacterId;
use crate::structs::Position;

/// One numeric state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeDelta {
    /// Add `amount` (possibly negative) to a character's resource. The
    /// balance never drops below zero.
    Resource {
        /// Whose balance changes.
        character: CharacterId,
        /// Resource name.
        resource: String,
        /// Signed change.
        amount: f64,
    },
    /// Move up to `amount` of a resource from one character to another,
    /// capped by the payer's balance when applied.
    Transfer {
        /// Payer.
        from: CharacterId,
        /// Recipient.
        to: CharacterId,
        /// Resource name.
        resource: String,
        /// Requested amount.
        amount: f64,
    },
    /// Shift one character's relationship toward another, clamped into
    /// `[-1, 1]`.
    Relationship {
        /// Who holds the relationship.
        from: CharacterId,
        /// Who it is about.
        toward: CharacterId,
        /// Signed change.
        amount: f64,
    },
    /// Add `amount` to a shared environment pool, floored at zero.
    EnvironmentResource {
        /// Pool name.
        resource: String,
        /// Signed change.
        amount: f64,
    },
    /// Place a character at a new position.
    Relocate {
        /// Who moves.
        character: CharacterId,
        /// Destination.
        position: Position,
    },
}

impl OutcomeDelta {
    /// Shorthand for [`OutcomeDelta::Resource`].
    pub fn resource(character: CharacterId, resource: &str, amount: f64) -> Self {
        Self::Resource {
            character,
            resource: resource.to_owned(),
            amount,
        }
    }

    /// Shorthand for [`OutcomeDelta::Transfer`].
    pub fn transfer(from: CharacterId, to: CharacterId, resource: &str, amount: f64) -> Self {
        Self::Transfer {
            from,
            to,
            resource: resource.to_owned(),
            amount,
        }
    }

    /// Shorthand for [`OutcomeDelta::Relationship`].
    pub const fn relationship(from: CharacterId, toward: CharacterId, amount: f64) -> Self {
        Self::Relationship {
            from,
            toward,
            amount,
        }
    }
}
