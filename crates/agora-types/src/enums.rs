//! Enumeration types for the Agora simulation.
//!
//! Every closed vocabulary in the simulation lives here: action types,
//! event types and the concrete resolutions behind them, belief labels,
//! and the trait/emotion axes used by the scoring tables.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The thirteen actions a character can choose each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Work together with another character for mutual gain.
    Cooperate,
    /// Contest another character for wealth.
    Compete,
    /// Bargain with another character.
    Negotiate,
    /// Propose or accept an alliance.
    Ally,
    /// Exploit another character's trust.
    Betray,
    /// Physically attack another character.
    Attack,
    /// Brace against another character.
    Defend,
    /// Give part of one's wealth to another character.
    Share,
    /// Talk with another character.
    Communicate,
    /// Travel toward a location and look for something valuable.
    Explore,
    /// Recover energy.
    Rest,
    /// Collect wealth from the shared environment.
    Gather,
    /// Watch the surroundings.
    Observe,
}

impl ActionType {
    /// All action types in their canonical scoring order.
    pub const ALL: [Self; 13] = [
        Self::Cooperate,
        Self::Compete,
        Self::Negotiate,
        Self::Ally,
        Self::Betray,
        Self::Attack,
        Self::Defend,
        Self::Share,
        Self::Communicate,
        Self::Explore,
        Self::Rest,
        Self::Gather,
        Self::Observe,
    ];

    /// Whether the action needs another character as its target.
    pub const fn requires_target(self) -> bool {
        matches!(
            self,
            Self::Cooperate
                | Self::Compete
                | Self::Negotiate
                | Self::Ally
                | Self::Betray
                | Self::Attack
                | Self::Defend
                | Self::Share
                | Self::Communicate
        )
    }

    /// Cooperate, ally, and share: the actions trust makes more likely.
    pub const fn is_cooperative(self) -> bool {
        matches!(self, Self::Cooperate | Self::Ally | Self::Share)
    }

    /// Attack, betray, and compete: the actions distrust makes more likely.
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Attack | Self::Betray | Self::Compete)
    }

    /// Cooperative actions plus communicate; these gain from a good relationship.
    pub const fn is_affiliative(self) -> bool {
        self.is_cooperative() || matches!(self, Self::Communicate)
    }

    /// Lowercase name used in generated text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cooperate => "cooperate",
            Self::Compete => "compete",
            Self::Negotiate => "negotiate",
            Self::Ally => "ally",
            Self::Betray => "betray",
            Self::Attack => "attack",
            Self::Defend => "defend",
            Self::Share => "share",
            Self::Communicate => "communicate",
            Self::Explore => "explore",
            Self::Rest => "rest",
            Self::Gather => "gather",
            Self::Observe => "observe",
        }
    }

    /// Rank used to pick the lead side when two characters target each
    /// other. Higher ranks lead.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Betray => 9,
            Self::Attack => 8,
            Self::Ally => 7,
            Self::Cooperate => 6,
            Self::Negotiate => 5,
            Self::Compete => 4,
            Self::Share => 3,
            Self::Communicate => 2,
            Self::Defend => 1,
            Self::Explore | Self::Rest | Self::Gather | Self::Observe => 0,
        }
    }
}

impl core::fmt::Display for ActionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Coarse classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A character acted on its own.
    Decision,
    /// Two characters interacted without violence.
    Interaction,
    /// Two characters fought.
    Conflict,
    /// Two characters formed an alliance.
    AllianceFormed,
    /// A character's mood swung sharply.
    EmotionalShift,
    /// Resources changed hands or were harvested.
    ResourceChange,
    /// Two characters bargained.
    Negotiation,
    /// The shared environment changed.
    Environmental,
    /// A system-level pattern was detected.
    Emergent,
}

/// Emotional color of an interaction, read by the emotion update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Valence {
    /// Raises happiness and trust.
    Positive,
    /// Raises anger and lowers trust.
    Negative,
    /// No interaction-level emotional effect.
    Neutral,
}

/// The concrete resolution that produced an event.
///
/// Each kind maps to exactly one [`EventType`]; the kind carries the detail
/// the emotion update needs without re-reading event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // --- Pair interactions ---
    /// Both characters cooperated with each other.
    MutualCooperation,
    /// One character offered cooperation that was not returned.
    OneSidedCooperation,
    /// A character betrayed another.
    Betrayal,
    /// An attack met no defense.
    Conflict,
    /// Both characters attacked each other.
    MutualConflict,
    /// An attack met a prepared defense.
    DefendedAttack,
    /// Two characters agreed to an alliance.
    AllianceFormed,
    /// A character proposed an alliance that was not accepted.
    AllianceProposed,
    /// Both characters negotiated with each other.
    MutualNegotiation,
    /// A character attempted to negotiate alone.
    NegotiationAttempt,
    /// A character shared wealth with another.
    Sharing,
    /// A character talked to another.
    Communication,
    /// Both characters competed with each other.
    Competition,
    /// A character competed against someone who did not engage.
    CompetitivePosturing,
    /// A character took a defensive stance without being attacked.
    DefensiveStance,

    // --- Solo actions ---
    /// A character explored toward a location.
    Exploration,
    /// A character rested.
    Rest,
    /// A character gathered from the environment.
    Gathering,
    /// A character observed the surroundings.
    Observation,

    // --- Environment ---
    /// A resource pool rose or fell.
    ResourceFluctuation,
    /// The weather changed.
    WeatherShift,
    /// Something unexplained was found.
    MysteriousDiscovery,

    // --- Emergent ---
    /// Three or more characters are linked by this tick's alliances.
    Coalition,
    /// A resource pool fell critically low.
    ResourceCrisis,
    /// One character holds a disproportionate share of resources.
    Dominance,
    /// Average trust across characters is deeply negative.
    TrustCollapse,
    /// Several conflicts broke out in one tick.
    Escalation,
}

impl EventKind {
    /// The coarse [`EventType`] this kind is reported as.
    pub const fn event_type(self) -> EventType {
        match self {
            Self::MutualCooperation
            | Self::OneSidedCooperation
            | Self::Betrayal
            | Self::AllianceProposed
            | Self::Communication
            | Self::Competition
            | Self::CompetitivePosturing => EventType::Interaction,
            Self::Conflict | Self::MutualConflict | Self::DefendedAttack => EventType::Conflict,
            Self::AllianceFormed => EventType::AllianceFormed,
            Self::MutualNegotiation | Self::NegotiationAttempt => EventType::Negotiation,
            Self::Sharing | Self::Gathering => EventType::ResourceChange,
            Self::DefensiveStance | Self::Exploration | Self::Rest | Self::Observation => {
                EventType::Decision
            }
            Self::ResourceFluctuation | Self::WeatherShift | Self::MysteriousDiscovery => {
                EventType::Environmental
            }
            Self::Coalition
            | Self::ResourceCrisis
            | Self::Dominance
            | Self::TrustCollapse
            | Self::Escalation => EventType::Emergent,
        }
    }

    /// Emotional color of the interaction for its participants.
    pub const fn valence(self) -> Valence {
        match self {
            Self::MutualCooperation
            | Self::OneSidedCooperation
            | Self::AllianceProposed
            | Self::Communication
            | Self::Sharing => Valence::Positive,
            Self::Betrayal | Self::Competition | Self::CompetitivePosturing => Valence::Negative,
            _ => Valence::Neutral,
        }
    }
}

// ---------------------------------------------------------------------------
// Beliefs
// ---------------------------------------------------------------------------

/// A label one character holds about another, inferred from memories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Belief {
    /// Remembered betraying or attacking three or more times.
    Untrustworthy,
    /// Remembered betraying twice, outweighing cooperation.
    Suspicious,
    /// Remembered cooperating three or more times, never betraying.
    Ally,
    /// Remembered cooperating twice, never betraying.
    Friendly,
}

impl Belief {
    /// Lowercase label used in generated text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Untrustworthy => "untrustworthy",
            Self::Suspicious => "suspicious",
            Self::Ally => "ally",
            Self::Friendly => "friendly",
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring axes
// ---------------------------------------------------------------------------

/// One of the five personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum PersonalityTrait {
    /// Curiosity and openness to experience.
    Openness,
    /// Diligence and self-discipline.
    Conscientiousness,
    /// Sociability.
    Extraversion,
    /// Warmth toward others.
    Agreeableness,
    /// Emotional volatility.
    Neuroticism,
}

impl PersonalityTrait {
    /// All traits in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Openness,
        Self::Conscientiousness,
        Self::Extraversion,
        Self::Agreeableness,
        Self::Neuroticism,
    ];

    /// Lowercase name used in generated text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Openness => "openness",
            Self::Conscientiousness => "conscientiousness",
            Self::Extraversion => "extraversion",
            Self::Agreeableness => "agreeableness",
            Self::Neuroticism => "neuroticism",
        }
    }
}

/// One of the seven emotional dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    /// Contentment.
    Happiness,
    /// Hostility.
    Anger,
    /// Apprehension.
    Fear,
    /// Confidence in others.
    Trust,
    /// Reaction to the unexpected.
    Surprise,
    /// Low mood.
    Sadness,
    /// Aversion.
    Disgust,
}

impl Emotion {
    /// All emotions in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Happiness,
        Self::Anger,
        Self::Fear,
        Self::Trust,
        Self::Surprise,
        Self::Sadness,
        Self::Disgust,
    ];
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Whether a simulation can still advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Steps advance the tick.
    #[default]
    Running,
    /// The tick limit was reached; steps are no-ops.
    Completed,
}
