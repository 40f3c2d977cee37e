//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Characters and simulations get UUID v7 (time-ordered) identifiers at
//! creation. Event identifiers are derived from the tick and the event's
//! position within that tick so that replaying a seeded simulation yields
//! the same event log.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Raw bytes of the identifier, used when mixing seeds.
            pub const fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a character in a simulation.
    CharacterId
}

define_id! {
    /// Unique identifier for an event in a simulation's event log.
    EventId
}

define_id! {
    /// Unique identifier for a simulation instance held by a registry.
    SimulationId
}

impl EventId {
    /// Deterministic identifier for the `sequence`-th event of `tick`.
    pub const fn derived(tick: u64, sequence: u64) -> Self {
        Self(Uuid::from_u64_pair(tick, sequence))
    }
}
