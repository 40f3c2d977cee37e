//! Scoring tables that turn a character's personality, emotions, and goals
//! into a base preference for each action type.
//!
//! ```text
//! base(action) = Σ trait·w_trait(action)
//!              + 0.5 · Σ emotion·w_emotion(action)
//!              + 0.4 · (goal keyword matches for action)
//! ```
//!
//! A goal matches a keyword when the keyword appears in the lowercased
//! goal text; a goal that contains two keywords mapping to the same action
//! counts twice.

use agora_types::{ActionType, Character, Emotion, EmotionalState, PersonalityTrait, PersonalityTraits};

use ActionType::{
    Ally, Attack, Betray, Communicate, Compete, Cooperate, Defend, Explore, Gather, Negotiate,
    Observe, Rest, Share,
};

/// Multiplier applied to the summed emotion term.
pub const EMOTION_SCALE: f64 = 0.5;

/// Bonus per goal keyword match.
pub const GOAL_BONUS: f64 = 0.4;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Action weights per personality trait.
pub const TRAIT_WEIGHTS: [(PersonalityTrait, &[(ActionType, f64)]); 5] = [
    (
        PersonalityTrait::Openness,
        &[
            (Explore, 0.9),
            (Communicate, 0.6),
            (Negotiate, 0.5),
            (Cooperate, 0.4),
            (Share, 0.5),
            (Observe, 0.7),
        ],
    ),
    (
        PersonalityTrait::Conscientiousness,
        &[
            (Gather, 0.8),
            (Defend, 0.6),
            (Rest, 0.5),
            (Observe, 0.6),
            (Cooperate, 0.5),
        ],
    ),
    (
        PersonalityTrait::Extraversion,
        &[
            (Communicate, 0.9),
            (Negotiate, 0.7),
            (Ally, 0.7),
            (Cooperate, 0.6),
            (Compete, 0.5),
            (Share, 0.4),
        ],
    ),
    (
        PersonalityTrait::Agreeableness,
        &[
            (Cooperate, 0.9),
            (Share, 0.8),
            (Ally, 0.7),
            (Negotiate, 0.5),
            (Communicate, 0.5),
            (Attack, -0.6),
            (Betray, -0.8),
            (Compete, -0.3),
        ],
    ),
    (
        PersonalityTrait::Neuroticism,
        &[
            (Defend, 0.7),
            (Rest, 0.5),
            (Observe, 0.6),
            (Attack, 0.4),
            (Betray, 0.3),
            (Explore, -0.4),
            (Negotiate, -0.3),
        ],
    ),
];

/// Action weights per emotion. Surprise has no entry.
pub const EMOTION_WEIGHTS: [(Emotion, &[(ActionType, f64)]); 6] = [
    (
        Emotion::Happiness,
        &[(Cooperate, 0.5), (Share, 0.6), (Communicate, 0.4), (Ally, 0.3)],
    ),
    (
        Emotion::Anger,
        &[
            (Attack, 0.7),
            (Compete, 0.5),
            (Betray, 0.3),
            (Cooperate, -0.4),
            (Share, -0.3),
        ],
    ),
    (
        Emotion::Fear,
        &[
            (Defend, 0.7),
            (Rest, 0.4),
            (Observe, 0.5),
            (Attack, -0.5),
            (Explore, -0.3),
        ],
    ),
    (
        Emotion::Trust,
        &[
            (Cooperate, 0.6),
            (Ally, 0.7),
            (Share, 0.5),
            (Negotiate, 0.4),
            (Betray, -0.6),
            (Attack, -0.3),
        ],
    ),
    (
        Emotion::Sadness,
        &[
            (Rest, 0.6),
            (Observe, 0.4),
            (Communicate, -0.3),
            (Compete, -0.3),
        ],
    ),
    (
        Emotion::Disgust,
        &[
            (Compete, 0.3),
            (Defend, 0.3),
            (Cooperate, -0.4),
            (Ally, -0.3),
        ],
    ),
];

/// Goal keywords and the actions they favor.
pub const GOAL_KEYWORDS: [(&str, [ActionType; 3]); 16] = [
    ("wealth", [Gather, Compete, Negotiate]),
    ("accumulate", [Gather, Compete, Negotiate]),
    ("power", [Compete, Attack, Ally]),
    ("dominate", [Attack, Compete, Betray]),
    ("knowledge", [Explore, Observe, Communicate]),
    ("learn", [Explore, Observe, Communicate]),
    ("peace", [Cooperate, Negotiate, Share]),
    ("harmony", [Cooperate, Share, Ally]),
    ("survive", [Gather, Defend, Rest]),
    ("survival", [Gather, Defend, Rest]),
    ("influence", [Negotiate, Ally, Communicate]),
    ("friendship", [Cooperate, Share, Communicate]),
    ("revenge", [Attack, Betray, Compete]),
    ("explore", [Explore, Observe, Gather]),
    ("trade", [Negotiate, Share, Cooperate]),
    ("protect", [Defend, Ally, Cooperate]),
];

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

fn weight_for(row: &[(ActionType, f64)], action: ActionType) -> f64 {
    row.iter()
        .find(|(a, _)| *a == action)
        .map_or(0.0, |(_, w)| *w)
}

/// `Σ trait·weight` for `action`.
pub fn trait_term(traits: &PersonalityTraits, action: ActionType) -> f64 {
    TRAIT_WEIGHTS
        .iter()
        .map(|(t, row)| traits.value(*t) * weight_for(row, action))
        .sum()
}

/// `Σ emotion·weight` for `action`, before scaling.
pub fn emotion_term(emotions: &EmotionalState, action: ActionType) -> f64 {
    EMOTION_WEIGHTS
        .iter()
        .map(|(e, row)| emotions.value(*e) * weight_for(row, action))
        .sum()
}

/// Number of (goal, keyword) pairs whose keyword favors `action`.
pub fn goal_matches(goals: &[String], action: ActionType) -> usize {
    goals
        .iter()
        .map(|goal| {
            let lowered = goal.to_lowercase();
            GOAL_KEYWORDS
                .iter()
                .filter(|(keyword, actions)| lowered.contains(keyword) && actions.contains(&action))
                .count()
        })
        .sum()
}

/// Combined personality, emotion, and goal preference for `action`.
#[allow(clippy::cast_precision_loss)]
pub fn base_score(character: &Character, action: ActionType) -> f64 {
    let goals = goal_matches(&character.goals, action) as f64;
    GOAL_BONUS.mul_add(
        goals,
        EMOTION_SCALE.mul_add(
            emotion_term(&character.emotional_state, action),
            trait_term(&character.traits, action),
        ),
    )
}
