//! End-to-end scenarios for the tick cycle.
//!
//! Each test builds a small simulation, scripts the characters' choices
//! where the outcome depends on them, and checks the state after stepping.
//! Randomness is set to zero so that no environmental events interfere.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

use std::collections::BTreeSet;

use agora_agents::base_score;
use agora_core::decision::evaluate_options;
use agora_core::perception::perceive;
use agora_core::{
    NoOpCallback, ScriptedDecisionSource, SimulationState, UtilityDecisionSource, run_simulation,
    run_tick, step,
};
use agora_types::{
    Action, ActionType, Belief, Character, CharacterId, ENERGY, Event, EventKind, EventType,
    INFLUENCE, PersonalityTraits, SimulationConfig, WEALTH,
};
use agora_world::detect_emergent_events;
use agora_world::environment::SCARCITY;

fn make_state(names: &[&str]) -> (SimulationState, Vec<CharacterId>) {
    let mut state = SimulationState::new(SimulationConfig {
        randomness: 0.0,
        max_ticks: 50,
        seed: 99,
        ..SimulationConfig::default()
    });
    let ids = names
        .iter()
        .map(|name| {
            state.add_character(Character::new(
                CharacterId::new(),
                *name,
                PersonalityTraits::default(),
            ))
        })
        .collect();
    (state, ids)
}

fn targeted(action_type: ActionType, target: CharacterId) -> Action {
    Action::new(action_type, Some(target))
}

fn of_kind(events: &[Event], kind: EventKind) -> Vec<&Event> {
    events.iter().filter(|e| e.kind == kind).collect()
}

#[test]
fn mutual_cooperation_rewards_both() {
    let (mut state, ids) = make_state(&["Ada", "Bram"]);
    let (a, b) = (ids[0], ids[1]);
    let mut source = ScriptedDecisionSource::new()
        .with(a, targeted(ActionType::Cooperate, b))
        .with(b, targeted(ActionType::Cooperate, a));

    let summary = run_tick(&mut state, &mut source).unwrap();

    let interactions: Vec<_> = summary
        .events
        .iter()
        .filter(|e| e.event_type == EventType::Interaction)
        .collect();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0].kind, EventKind::MutualCooperation);
    for id in [a, b] {
        let character = state.character(id).unwrap();
        assert_eq!(character.resource(INFLUENCE), 55.0);
        assert_eq!(character.resource(WEALTH), 53.0);
    }
}

#[test]
fn attack_against_defense_costs_both_energy() {
    let (mut state, ids) = make_state(&["Ada", "Bram"]);
    let (a, b) = (ids[0], ids[1]);
    let mut source = ScriptedDecisionSource::new()
        .with(a, targeted(ActionType::Attack, b))
        .with(b, targeted(ActionType::Defend, a));

    let summary = run_tick(&mut state, &mut source).unwrap();

    let conflicts: Vec<_> = summary
        .events
        .iter()
        .filter(|e| e.event_type == EventType::Conflict)
        .collect();
    assert_eq!(conflicts.len(), 1);
    let conflict = conflicts[0];
    assert_eq!(conflict.kind, EventKind::DefendedAttack);
    assert_eq!(conflict.participants, vec![a, b]);

    let attacker = state.character(a).unwrap();
    let defender = state.character(b).unwrap();
    assert_eq!(attacker.resource(ENERGY), 88.0);
    assert_eq!(defender.resource(ENERGY), 95.0);

    let winner = conflict.winner.unwrap();
    if winner == a {
        assert!(attacker.resource(WEALTH) > 50.0);
    } else {
        assert_eq!(attacker.resource(WEALTH), 50.0);
        assert_eq!(defender.resource(INFLUENCE), 55.0);
    }
    assert_eq!(attacker.resource(WEALTH) + defender.resource(WEALTH), 100.0);
}

#[test]
fn drained_food_triggers_crisis() {
    let (mut state, ids) = make_state(&["Ada"]);
    state.environment.resources.insert("food".to_owned(), 10.0);
    let mut source = ScriptedDecisionSource::new().with(ids[0], Action::new(ActionType::Rest, None));

    let summary = run_tick(&mut state, &mut source).unwrap();

    let crises = of_kind(&summary.events, EventKind::ResourceCrisis);
    assert_eq!(crises.len(), 1);
    assert_eq!(crises[0].title, "Crisis: food shortage");
    assert_eq!(crises[0].event_type, EventType::Emergent);
    assert_eq!(
        state.environment.conditions.get(SCARCITY).map(String::as_str),
        Some("severe")
    );
}

#[test]
fn stepping_a_starved_world_reports_crisis() {
    let (mut state, _) = make_state(&["Ada", "Bram", "Cleo"]);
    state.environment.resources.insert("food".to_owned(), 5.0);

    let events = step(&mut state);

    let crises = of_kind(&events, EventKind::ResourceCrisis);
    assert_eq!(crises.len(), 1);
    assert_eq!(crises[0].participants.len(), 3);
    assert_eq!(state.events.len(), events.len());
    assert_eq!(
        state.environment.conditions.get(SCARCITY).map(String::as_str),
        Some("severe")
    );
}

#[test]
fn tired_isolated_character_favors_rest() {
    let (mut state, ids) = make_state(&["Ada"]);
    let ada = state.characters.get_mut(&ids[0]).unwrap();
    ada.resources.insert(ENERGY.to_owned(), 30.0);

    let character = state.character(ids[0]).unwrap();
    let perception = perceive(character, &state);
    assert!(perception.nearby_characters.is_empty());

    let options = evaluate_options(character, &perception);
    assert!(options.iter().all(|o| o.action.target.is_none()));
    let bonus = |action_type: ActionType| {
        let option = options
            .iter()
            .find(|o| o.action.action_type == action_type)
            .unwrap();
        option.score - base_score(character, action_type)
    };
    assert!((bonus(ActionType::Rest) - 0.5).abs() < 1e-9);
    assert_eq!(bonus(ActionType::Explore), 0.0);
    assert_eq!(bonus(ActionType::Observe), 0.0);
}

#[test]
fn alliances_chained_in_one_tick_form_a_coalition() {
    let (mut state, ids) = make_state(&["Ada", "Bram", "Cleo"]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);
    let alliance = |x: CharacterId, y: CharacterId| {
        Event::new(0, EventKind::AllianceFormed, "Alliance", "Allied").with_participants(vec![x, y])
    };
    let tick_events = vec![alliance(a, b), alliance(b, c), alliance(a, c)];
    let living: Vec<&Character> = state.roster_characters().collect();
    let mut environment = state.environment.clone();

    let emergent = detect_emergent_events(&living, &mut environment, &tick_events, 0);

    let coalitions = of_kind(&emergent, EventKind::Coalition);
    assert_eq!(coalitions.len(), 1);
    let members: BTreeSet<_> = coalitions[0].participants.iter().copied().collect();
    assert_eq!(members, BTreeSet::from([a, b, c]));
    assert_eq!(coalitions[0].title, "Coalition formed");

    // A single mutual alliance through the tick cycle is not a coalition.
    let mut source = ScriptedDecisionSource::new()
        .with(a, targeted(ActionType::Ally, b))
        .with(b, targeted(ActionType::Ally, a))
        .with(c, Action::new(ActionType::Observe, None));
    let summary = run_tick(&mut state, &mut source).unwrap();
    assert_eq!(of_kind(&summary.events, EventKind::AllianceFormed).len(), 1);
    assert!(of_kind(&summary.events, EventKind::Coalition).is_empty());
}

#[test]
fn repeated_betrayal_breeds_distrust() {
    let (mut state, ids) = make_state(&["Ada", "Bram"]);
    let (a, b) = (ids[0], ids[1]);
    let cooperate_score = |state: &SimulationState| {
        let ada = state.character(a).unwrap();
        evaluate_options(ada, &perceive(ada, state))
            .into_iter()
            .find(|o| o.action.action_type == ActionType::Cooperate && o.action.target == Some(b))
            .unwrap()
            .score
    };
    let trusting = cooperate_score(&state);

    let mut source = ScriptedDecisionSource::new()
        .with(a, Action::new(ActionType::Observe, None))
        .with(b, targeted(ActionType::Betray, a));

    run_tick(&mut state, &mut source).unwrap();
    run_tick(&mut state, &mut source).unwrap();
    let beliefs = &state.character(a).unwrap().memory.beliefs;
    assert_eq!(beliefs.get(&b), Some(&Belief::Suspicious));

    run_tick(&mut state, &mut source).unwrap();
    let ada = state.character(a).unwrap();
    assert_eq!(ada.memory.beliefs.get(&b), Some(&Belief::Untrustworthy));
    assert_eq!(ada.resource(WEALTH), 20.0);
    assert!(ada.relationship(b) < 0.0);
    assert!(cooperate_score(&state) < trusting - 0.6);
}

#[test]
fn seeded_runs_are_reproducible() {
    let (mut first, _) = make_state(&["Ada", "Bram", "Cleo", "Dov"]);
    first.config.randomness = 0.8;
    first.config.max_ticks = 30;
    let mut second = first.clone();

    let one = run_simulation(&mut first, &mut UtilityDecisionSource, &mut NoOpCallback);
    let two = run_simulation(&mut second, &mut UtilityDecisionSource, &mut NoOpCallback);

    assert_eq!(one.total_ticks, 30);
    assert_eq!(two.total_ticks, 30);
    assert_eq!(first.events, second.events);
    assert_eq!(first.characters, second.characters);
    for character in first.characters.values() {
        for value in character.relationships.values() {
            assert!((-1.0..=1.0).contains(value));
        }
        assert!(character.resources.values().all(|v| *v >= 0.0));
        assert!(character.memory.short_term.len() <= 20);
    }
}
