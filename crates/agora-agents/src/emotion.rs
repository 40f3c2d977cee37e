//! Emotional response to a tick's events.
//!
//! Every update first decays all emotions toward zero, then applies the
//! reactions for each event the character took part in. Win/loss and
//! gain/loss are read from the event's structured outcome, never from its
//! text. Every adjustment clamps into `[-1, 1]`.

use agora_types::{Character, Emotion, Event, EventType, Valence};

use crate::config::EmotionConfig;

/// Apply decay and event reactions to `character`'s emotional state.
pub fn update_emotions(character: &mut Character, events: &[Event], config: &EmotionConfig) {
    let id = character.id;
    let neuroticism = character.traits.neuroticism;
    let emo = &mut character.emotional_state;

    for emotion in Emotion::ALL {
        let rate = if emotion == Emotion::Surprise {
            config.surprise_decay_rate
        } else {
            config.decay_rate
        };
        emo.scale(emotion, 1.0 - rate);
    }

    for event in events.iter().filter(|e| e.involves(id)) {
        match event.event_type {
            EventType::AllianceFormed => {
                emo.adjust(Emotion::Happiness, 0.2);
                emo.adjust(Emotion::Trust, 0.3);
            }
            EventType::Conflict => {
                if event.winner == Some(id) {
                    emo.adjust(Emotion::Happiness, 0.15);
                } else {
                    emo.adjust(Emotion::Anger, 0.3);
                    emo.adjust(Emotion::Sadness, 0.15);
                }
                emo.adjust(Emotion::Fear, 0.1);
            }
            EventType::Negotiation => emo.adjust(Emotion::Trust, 0.1),
            EventType::ResourceChange => {
                let (gained, lost) = event.resource_flow(id);
                if gained {
                    emo.adjust(Emotion::Happiness, 0.1);
                }
                if lost {
                    emo.adjust(Emotion::Sadness, 0.15);
                    emo.adjust(Emotion::Fear, 0.05);
                }
            }
            EventType::Emergent => emo.adjust(Emotion::Surprise, 0.4),
            EventType::Interaction => match event.kind.valence() {
                Valence::Positive => {
                    emo.adjust(Emotion::Happiness, 0.1);
                    emo.adjust(Emotion::Trust, 0.1);
                }
                Valence::Negative => {
                    emo.adjust(Emotion::Anger, 0.15);
                    emo.adjust(Emotion::Trust, -0.15);
                }
                Valence::Neutral => {}
            },
            EventType::Decision | EventType::EmotionalShift | EventType::Environmental => {}
        }

        if matches!(event.event_type, EventType::Conflict | EventType::Emergent) {
            emo.adjust(Emotion::Fear, neuroticism * 0.15);
            emo.adjust(Emotion::Anger, neuroticism * 0.1);
        }
    }
}
