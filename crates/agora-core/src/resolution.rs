//! Event resolution: turning a tick's chosen actions into events.
//!
//! Solo actions (explore, rest, gather, observe) resolve on their own.
//! Targeted actions resolve per unordered pair of characters, once per
//! tick, against whatever the target chose to do back:
//!
//! | lead intent | counter intent | result                  |
//! |-------------|----------------|-------------------------|
//! | cooperate   | cooperate      | mutual cooperation      |
//! | cooperate   | other / none   | one-sided cooperation   |
//! | betray      | any            | betrayal                |
//! | attack      | attack         | mutual conflict         |
//! | attack      | defend         | defended attack         |
//! | attack      | other / none   | conflict                |
//! | ally        | ally/cooperate | alliance formed         |
//! | ally        | other / none   | alliance proposed       |
//! | negotiate   | negotiate      | mutual negotiation      |
//! | negotiate   | other / none   | negotiation attempt     |
//! | share       | any            | sharing                 |
//! | communicate | any            | communication           |
//! | compete     | compete        | competition             |
//! | compete     | other / none   | competitive posturing   |
//! | defend      | any            | defensive stance        |
//!
//! When both characters target each other, the side whose intent has the
//! higher [`ActionType::precedence`] leads; equal intents are led by the
//! character earlier in the roster.
//!
//! Resolvers read the start-of-tick state and never mutate it. Every
//! consequence is attached to the event as an [`OutcomeDelta`] and applied
//! later by [`crate::outcome`].

use std::collections::{BTreeMap, BTreeSet};

use agora_types::{
    Action, ActionType, Character, CharacterId, ENERGY, Event, EventKind, INFLUENCE,
    OutcomeDelta, WEALTH,
};
use agora_world::{SimRng, gaussian, seed::stream};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use crate::tick::SimulationState;

/// Relationship penalty both sides take from any fight.
pub const HOSTILITY_PENALTY: f64 = -0.2;

/// Energy ceiling that resting cannot exceed.
pub const MAX_RESTED_ENERGY: f64 = 100.0;

/// Resolve every decision into events.
///
/// `decisions` must be in roster order. Dead, missing, or self targets are
/// skipped with a warning; they never fail the tick.
pub fn resolve_actions(state: &SimulationState, decisions: &[(CharacterId, Action)]) -> Vec<Event> {
    let resolver = Resolver {
        state,
        tick: state.tick,
    };
    let intents: BTreeMap<CharacterId, &Action> =
        decisions.iter().map(|(id, action)| (*id, action)).collect();
    let mut handled: BTreeSet<(CharacterId, CharacterId)> = BTreeSet::new();
    let mut events = Vec::new();

    for (id, action) in decisions {
        let Some(actor) = state.character(*id).filter(|c| c.alive) else {
            continue;
        };
        let kind = action.action_type;

        if !kind.requires_target() {
            events.push(resolver.solo(actor, kind));
            continue;
        }

        let Some(target_id) = action.target else {
            warn!(tick = resolver.tick, character = %actor.name, action = %kind, "Targeted action has no target, skipped");
            continue;
        };
        let Some(target) = state
            .character(target_id)
            .filter(|t| t.alive && t.id != actor.id)
        else {
            warn!(tick = resolver.tick, character = %actor.name, action = %kind, target = %target_id, "Target unavailable, action skipped");
            continue;
        };

        let pair = if *id < target_id {
            (*id, target_id)
        } else {
            (target_id, *id)
        };
        if !handled.insert(pair) {
            continue;
        }

        let counter = intents
            .get(&target_id)
            .filter(|a| a.target == Some(*id) && a.action_type.requires_target())
            .map(|a| a.action_type);

        let event = match counter {
            Some(theirs) if theirs.precedence() > kind.precedence() => {
                resolver.pair(target, theirs, actor, Some(kind))
            }
            _ => resolver.pair(actor, kind, target, counter),
        };
        debug!(
            tick = resolver.tick,
            kind = ?event.kind,
            title = %event.title,
            "Interaction resolved"
        );
        events.push(event);
    }

    events
}

/// Read-only view of the state used by the individual resolvers.
struct Resolver<'a> {
    state: &'a SimulationState,
    tick: u64,
}

impl Resolver<'_> {
    fn rng(&self, label: &str, characters: &[CharacterId]) -> SimRng {
        stream(self.state.config.seed, label, characters, self.tick)
    }

    const fn randomness(&self) -> f64 {
        self.state.config.randomness
    }

    fn event(&self, kind: EventKind, title: String, description: String) -> Event {
        Event::new(self.tick, kind, title, description)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    fn pair(
        &self,
        lead: &Character,
        intent: ActionType,
        other: &Character,
        counter: Option<ActionType>,
    ) -> Event {
        match intent {
            ActionType::Cooperate => match counter {
                Some(ActionType::Cooperate) => self.mutual_cooperation(lead, other),
                Some(ActionType::Ally) => self.alliance_formed(lead, other),
                _ => self.one_sided_cooperation(lead, other),
            },
            ActionType::Betray => self.betrayal(lead, other),
            ActionType::Attack => match counter {
                Some(ActionType::Attack) => self.mutual_conflict(lead, other),
                Some(ActionType::Defend) => self.defended_attack(lead, other),
                _ => self.conflict(lead, other),
            },
            ActionType::Ally => match counter {
                Some(ActionType::Ally | ActionType::Cooperate) => self.alliance_formed(lead, other),
                _ => self.alliance_proposed(lead, other),
            },
            ActionType::Negotiate => match counter {
                Some(ActionType::Negotiate) => self.mutual_negotiation(lead, other),
                _ => self.negotiation_attempt(lead, other),
            },
            ActionType::Share => self.sharing(lead, other),
            ActionType::Communicate => self.communication(lead, other),
            ActionType::Compete => match counter {
                Some(ActionType::Compete) => self.competition(lead, other),
                _ => self.competitive_posturing(lead, other),
            },
            ActionType::Defend => self.defensive_stance(lead, other),
            ActionType::Explore | ActionType::Rest | ActionType::Gather | ActionType::Observe => {
                self.solo(lead, intent)
            }
        }
    }

    fn solo(&self, c: &Character, intent: ActionType) -> Event {
        match intent {
            ActionType::Explore => self.explore(c),
            ActionType::Rest => self.rest(c),
            ActionType::Gather => self.gather(c),
            _ => self.observe(c),
        }
    }

    // -----------------------------------------------------------------------
    // Cooperation
    // -----------------------------------------------------------------------

    fn mutual_cooperation(&self, a: &Character, b: &Character) -> Event {
        self.event(
            EventKind::MutualCooperation,
            format!("{} and {} cooperate", a.name, b.name),
            format!(
                "{} and {} pooled their efforts toward a common goal and both came out ahead.",
                a.name, b.name
            ),
        )
        .with_participants(vec![a.id, b.id])
        .with_outcomes(vec![
            format!("{} gained 5 influence and 3 wealth", a.name),
            format!("{} gained 5 influence and 3 wealth", b.name),
        ])
        .with_importance(0.5)
        .with_deltas(vec![
            OutcomeDelta::resource(a.id, INFLUENCE, 5.0),
            OutcomeDelta::resource(a.id, WEALTH, 3.0),
            OutcomeDelta::resource(b.id, INFLUENCE, 5.0),
            OutcomeDelta::resource(b.id, WEALTH, 3.0),
        ])
    }

    fn one_sided_cooperation(&self, cooperator: &Character, other: &Character) -> Event {
        self.event(
            EventKind::OneSidedCooperation,
            format!("{} offers to cooperate with {}", cooperator.name, other.name),
            format!(
                "{} reached out to cooperate, but {} had other plans.",
                cooperator.name, other.name
            ),
        )
        .with_participants(vec![cooperator.id, other.id])
        .with_outcomes(vec![format!("{} gained 2 influence from goodwill", cooperator.name)])
        .with_importance(0.3)
        .with_deltas(vec![OutcomeDelta::resource(cooperator.id, INFLUENCE, 2.0)])
    }

    fn betrayal(&self, betrayer: &Character, victim: &Character) -> Event {
        let stolen = victim.resource(WEALTH).clamp(0.0, 10.0);
        self.event(
            EventKind::Betrayal,
            format!("{} betrays {}", betrayer.name, victim.name),
            format!(
                "{} betrayed {}'s trust and stole {stolen:.0} wealth.",
                betrayer.name, victim.name
            ),
        )
        .with_participants(vec![betrayer.id, victim.id])
        .with_outcomes(vec![
            format!("{} stole {stolen:.0} wealth from {}", betrayer.name, victim.name),
            format!("{} lost 8 influence to a damaged reputation", betrayer.name),
            format!("{} lost {stolen:.0} wealth", victim.name),
        ])
        .with_importance(0.8)
        .with_deltas(vec![
            OutcomeDelta::transfer(victim.id, betrayer.id, WEALTH, stolen),
            OutcomeDelta::resource(betrayer.id, INFLUENCE, -8.0),
            OutcomeDelta::relationship(betrayer.id, victim.id, -0.4),
            OutcomeDelta::relationship(victim.id, betrayer.id, -0.6),
        ])
    }

    fn alliance_formed(&self, a: &Character, b: &Character) -> Event {
        self.event(
            EventKind::AllianceFormed,
            format!("Alliance: {} & {}", a.name, b.name),
            format!(
                "{} and {} formed an alliance, pledging mutual support.",
                a.name, b.name
            ),
        )
        .with_participants(vec![a.id, b.id])
        .with_outcomes(vec![
            format!("{} and {} are now allies", a.name, b.name),
            "Both gained 5 influence".to_owned(),
        ])
        .with_importance(0.7)
        .with_deltas(vec![
            OutcomeDelta::relationship(a.id, b.id, 0.4),
            OutcomeDelta::relationship(b.id, a.id, 0.4),
            OutcomeDelta::resource(a.id, INFLUENCE, 5.0),
            OutcomeDelta::resource(b.id, INFLUENCE, 5.0),
        ])
    }

    fn alliance_proposed(&self, proposer: &Character, target: &Character) -> Event {
        self.event(
            EventKind::AllianceProposed,
            format!("{} proposes an alliance to {}", proposer.name, target.name),
            format!(
                "{} offered an alliance to {}, who has not answered yet.",
                proposer.name, target.name
            ),
        )
        .with_participants(vec![proposer.id, target.id])
        .with_outcomes(vec![format!("{} may answer next turn", target.name)])
        .with_importance(0.4)
        .with_deltas(vec![OutcomeDelta::relationship(proposer.id, target.id, 0.1)])
    }

    fn sharing(&self, sharer: &Character, receiver: &Character) -> Event {
        let amount = (sharer.resource(WEALTH) * 0.15).clamp(0.0, 5.0);
        self.event(
            EventKind::Sharing,
            format!("{} shares with {}", sharer.name, receiver.name),
            format!(
                "{} shared {amount:.0} wealth with {}.",
                sharer.name, receiver.name
            ),
        )
        .with_participants(vec![sharer.id, receiver.id])
        .with_outcomes(vec![
            format!("{} received {amount:.0} wealth", receiver.name),
            format!("{} gained 3 influence", sharer.name),
        ])
        .with_importance(0.4)
        .with_deltas(vec![
            OutcomeDelta::transfer(sharer.id, receiver.id, WEALTH, amount),
            OutcomeDelta::resource(sharer.id, INFLUENCE, 3.0),
            OutcomeDelta::relationship(sharer.id, receiver.id, 0.2),
            OutcomeDelta::relationship(receiver.id, sharer.id, 0.25),
        ])
    }

    fn communication(&self, a: &Character, b: &Character) -> Event {
        self.event(
            EventKind::Communication,
            format!("{} talks with {}", a.name, b.name),
            format!("{} and {} traded news and opinions.", a.name, b.name),
        )
        .with_participants(vec![a.id, b.id])
        .with_outcomes(vec!["Information exchanged".to_owned()])
        .with_importance(0.25)
        .with_deltas(vec![
            OutcomeDelta::relationship(a.id, b.id, 0.1),
            OutcomeDelta::relationship(b.id, a.id, 0.05),
        ])
    }

    // -----------------------------------------------------------------------
    // Hostility
    // -----------------------------------------------------------------------

    fn conflict(&self, attacker: &Character, defender: &Character) -> Event {
        let mut rng = self.rng("conflict", &[attacker.id, defender.id]);
        let attack = attacker.resource(ENERGY).mul_add(
            0.6,
            attacker.resource(INFLUENCE) * 0.2,
        ) + gaussian(&mut rng, 0.0, self.randomness() * 10.0);
        let defense = defender
            .resource(ENERGY)
            .mul_add(0.4, defender.resource(INFLUENCE) * 0.3);

        let (winner, description, mut deltas) = if attack > defense {
            let loot = defender.resource(WEALTH).clamp(0.0, 8.0);
            (
                attacker,
                format!(
                    "{} attacked {} and overpowered them, seizing {loot:.0} wealth.",
                    attacker.name, defender.name
                ),
                vec![
                    OutcomeDelta::transfer(defender.id, attacker.id, WEALTH, loot),
                    OutcomeDelta::resource(attacker.id, ENERGY, -10.0),
                    OutcomeDelta::resource(defender.id, ENERGY, -15.0),
                ],
            )
        } else {
            (
                defender,
                format!(
                    "{} attacked {} but was driven back.",
                    attacker.name, defender.name
                ),
                vec![
                    OutcomeDelta::resource(attacker.id, ENERGY, -15.0),
                    OutcomeDelta::resource(defender.id, ENERGY, -5.0),
                ],
            )
        };
        deltas.extend(hostility(attacker.id, defender.id));

        self.event(
            EventKind::Conflict,
            format!("Conflict: {} vs {}", attacker.name, defender.name),
            description,
        )
        .with_participants(vec![attacker.id, defender.id])
        .with_outcomes(vec![format!("{} wins the conflict", winner.name)])
        .with_importance(0.7)
        .with_winner(winner.id)
        .with_deltas(deltas)
    }

    fn mutual_conflict(&self, a: &Character, b: &Character) -> Event {
        let mut rng = self.rng("mutual_conflict", &[a.id, b.id]);
        let a_power = a.resource(ENERGY) + gaussian(&mut rng, 0.0, 10.0);
        let b_power = b.resource(ENERGY) + gaussian(&mut rng, 0.0, 10.0);
        let (winner, loser) = if a_power > b_power { (a, b) } else { (b, a) };
        let loot = loser.resource(WEALTH).clamp(0.0, 10.0);

        let mut deltas = vec![
            OutcomeDelta::resource(a.id, ENERGY, -20.0),
            OutcomeDelta::resource(b.id, ENERGY, -20.0),
            OutcomeDelta::transfer(loser.id, winner.id, WEALTH, loot),
        ];
        deltas.extend(hostility(a.id, b.id));

        self.event(
            EventKind::MutualConflict,
            format!("Battle: {} vs {}", a.name, b.name),
            format!(
                "{} and {} attacked each other in a brutal battle; {} prevailed and took {loot:.0} wealth.",
                a.name, b.name, winner.name
            ),
        )
        .with_participants(vec![a.id, b.id])
        .with_outcomes(vec![
            format!("{} wins the battle", winner.name),
            "Both combatants are exhausted".to_owned(),
        ])
        .with_importance(0.8)
        .with_winner(winner.id)
        .with_deltas(deltas)
    }

    fn defended_attack(&self, attacker: &Character, defender: &Character) -> Event {
        let mut rng = self.rng("defended_attack", &[attacker.id, defender.id]);
        let attack = attacker
            .resource(ENERGY)
            .mul_add(0.5, gaussian(&mut rng, 0.0, 5.0));
        let defense = defender
            .resource(ENERGY)
            .mul_add(0.7, defender.resource(INFLUENCE) * 0.2);

        let mut deltas = vec![
            OutcomeDelta::resource(attacker.id, ENERGY, -12.0),
            OutcomeDelta::resource(defender.id, ENERGY, -5.0),
        ];
        let (winner, description) = if attack > defense {
            let loot = defender.resource(WEALTH).clamp(0.0, 5.0);
            deltas.push(OutcomeDelta::transfer(defender.id, attacker.id, WEALTH, loot));
            (
                attacker,
                format!(
                    "{} broke through {}'s defenses and seized {loot:.0} wealth.",
                    attacker.name, defender.name
                ),
            )
        } else {
            deltas.push(OutcomeDelta::resource(defender.id, INFLUENCE, 5.0));
            (
                defender,
                format!(
                    "{} repelled {}'s attack and earned respect.",
                    defender.name, attacker.name
                ),
            )
        };
        deltas.extend(hostility(attacker.id, defender.id));

        self.event(
            EventKind::DefendedAttack,
            format!("{} attacks, {} defends", attacker.name, defender.name),
            description.clone(),
        )
        .with_participants(vec![attacker.id, defender.id])
        .with_outcomes(vec![description])
        .with_importance(0.6)
        .with_winner(winner.id)
        .with_deltas(deltas)
    }

    fn defensive_stance(&self, defender: &Character, other: &Character) -> Event {
        self.event(
            EventKind::DefensiveStance,
            format!("{} takes a defensive stance", defender.name),
            format!(
                "{} braced against {}, but no blow came.",
                defender.name, other.name
            ),
        )
        .with_participants(vec![defender.id, other.id])
        .with_outcomes(vec![format!("{} stands ready", defender.name)])
        .with_importance(0.3)
    }

    // -----------------------------------------------------------------------
    // Bargaining and rivalry
    // -----------------------------------------------------------------------

    fn mutual_negotiation(&self, a: &Character, b: &Character) -> Event {
        let (winner, loser) = if negotiation_skill(a) > negotiation_skill(b) {
            (a, b)
        } else {
            (b, a)
        };
        self.event(
            EventKind::MutualNegotiation,
            format!("{} and {} negotiate", a.name, b.name),
            format!(
                "{} and {} sat down to bargain; {} got the better deal.",
                a.name, b.name, winner.name
            ),
        )
        .with_participants(vec![a.id, b.id])
        .with_outcomes(vec![
            format!("{} gets a better deal", winner.name),
            "Both parties gain rapport".to_owned(),
        ])
        .with_importance(0.5)
        .with_winner(winner.id)
        .with_deltas(vec![
            OutcomeDelta::resource(winner.id, WEALTH, 3.0),
            OutcomeDelta::resource(loser.id, WEALTH, -1.5),
            OutcomeDelta::relationship(a.id, b.id, 0.1),
            OutcomeDelta::relationship(b.id, a.id, 0.1),
        ])
    }

    fn negotiation_attempt(&self, negotiator: &Character, target: &Character) -> Event {
        self.event(
            EventKind::NegotiationAttempt,
            format!("{} tries to negotiate with {}", negotiator.name, target.name),
            format!(
                "{} approached {} with an offer, but {} was preoccupied.",
                negotiator.name, target.name, target.name
            ),
        )
        .with_participants(vec![negotiator.id, target.id])
        .with_outcomes(vec![format!(
            "{} gained 2 influence from diplomatic effort",
            negotiator.name
        )])
        .with_importance(0.3)
        .with_deltas(vec![OutcomeDelta::resource(negotiator.id, INFLUENCE, 2.0)])
    }

    fn competition(&self, a: &Character, b: &Character) -> Event {
        let mut rng = self.rng("competition", &[a.id, b.id]);
        let spread = self.randomness() * 15.0;
        let a_score = a.resource(ENERGY).mul_add(0.3, a.traits.conscientiousness * 20.0)
            + gaussian(&mut rng, 0.0, spread);
        let b_score = b.resource(ENERGY).mul_add(0.3, b.traits.conscientiousness * 20.0)
            + gaussian(&mut rng, 0.0, spread);
        let winner = if a_score > b_score { a } else { b };

        self.event(
            EventKind::Competition,
            format!("Competition: {} vs {}", a.name, b.name),
            format!(
                "{} and {} competed head to head; {} came out on top.",
                a.name, b.name, winner.name
            ),
        )
        .with_participants(vec![a.id, b.id])
        .with_outcomes(vec![format!("{} wins 8 wealth and 3 influence", winner.name)])
        .with_importance(0.5)
        .with_winner(winner.id)
        .with_deltas(vec![
            OutcomeDelta::resource(winner.id, WEALTH, 8.0),
            OutcomeDelta::resource(winner.id, INFLUENCE, 3.0),
            OutcomeDelta::resource(a.id, ENERGY, -8.0),
            OutcomeDelta::resource(b.id, ENERGY, -8.0),
        ])
    }

    fn competitive_posturing(&self, competitor: &Character, target: &Character) -> Event {
        self.event(
            EventKind::CompetitivePosturing,
            format!("{} competes near {}", competitor.name, target.name),
            format!(
                "{} pushed for advantage around {}'s territory.",
                competitor.name, target.name
            ),
        )
        .with_participants(vec![competitor.id, target.id])
        .with_outcomes(vec![format!("{} gained 3 wealth", competitor.name)])
        .with_importance(0.3)
        .with_deltas(vec![
            OutcomeDelta::resource(competitor.id, ENERGY, -5.0),
            OutcomeDelta::resource(competitor.id, WEALTH, 3.0),
        ])
    }

    // -----------------------------------------------------------------------
    // Solo actions
    // -----------------------------------------------------------------------

    fn explore(&self, c: &Character) -> Event {
        let mut rng = self.rng("explore", &[c.id]);
        let destination = self.state.environment.locations.choose(&mut rng);
        let found = rng.random::<f64>() < 0.4;

        let mut deltas = vec![OutcomeDelta::resource(c.id, ENERGY, -5.0)];
        if let Some(location) = destination {
            deltas.push(OutcomeDelta::Relocate {
                character: c.id,
                position: c.position.toward(location.position, 0.3),
            });
        }
        let heading = destination.map_or_else(
            || "into open country".to_owned(),
            |l| format!("toward {}", l.name),
        );

        let event = if found {
            deltas.push(OutcomeDelta::resource(c.id, WEALTH, 3.0));
            self.event(
                EventKind::Exploration,
                format!("{} explores and discovers something", c.name),
                format!("{} set out {heading} and found something valuable.", c.name),
            )
            .with_outcomes(vec![format!("{} gained 3 wealth from exploration", c.name)])
            .with_importance(0.4)
        } else {
            self.event(
                EventKind::Exploration,
                format!("{} explores", c.name),
                format!("{} scouted {heading}, mapping the surroundings.", c.name),
            )
            .with_outcomes(vec!["Knowledge gained about the area".to_owned()])
            .with_importance(0.2)
        };
        event.with_participants(vec![c.id]).with_deltas(deltas)
    }

    fn rest(&self, c: &Character) -> Event {
        let recovery = c.traits.conscientiousness.mul_add(10.0, 15.0);
        let gained = recovery.min(MAX_RESTED_ENERGY - c.resource(ENERGY)).max(0.0);
        self.event(
            EventKind::Rest,
            format!("{} rests", c.name),
            format!("{} took time to rest and regained {gained:.0} energy.", c.name),
        )
        .with_participants(vec![c.id])
        .with_outcomes(vec![format!("{} recovers {gained:.0} energy", c.name)])
        .with_importance(0.15)
        .with_deltas(vec![OutcomeDelta::resource(c.id, ENERGY, gained)])
    }

    fn gather(&self, c: &Character) -> Event {
        let gathered = c.traits.conscientiousness.mul_add(5.0, 5.0);
        let pools = &self.state.environment.resources;
        let pool_count = f64::from(u32::try_from(pools.len()).unwrap_or(u32::MAX));
        let mut deltas = vec![
            OutcomeDelta::resource(c.id, ENERGY, -8.0),
            OutcomeDelta::resource(c.id, WEALTH, gathered),
        ];
        if pool_count > 0.0 {
            let drain = gathered * 0.3 / pool_count;
            deltas.extend(pools.keys().map(|name| OutcomeDelta::EnvironmentResource {
                resource: name.clone(),
                amount: -drain,
            }));
        }
        self.event(
            EventKind::Gathering,
            format!("{} gathers resources", c.name),
            format!("{} spent the day gathering and collected {gathered:.0} wealth.", c.name),
        )
        .with_participants(vec![c.id])
        .with_outcomes(vec![format!("{} gained {gathered:.0} wealth", c.name)])
        .with_importance(0.3)
        .with_deltas(deltas)
    }

    fn observe(&self, c: &Character) -> Event {
        self.event(
            EventKind::Observation,
            format!("{} observes", c.name),
            format!("{} watched carefully, taking in everything nearby.", c.name),
        )
        .with_participants(vec![c.id])
        .with_outcomes(vec!["Information gathered through observation".to_owned()])
        .with_importance(0.15)
        .with_deltas(vec![OutcomeDelta::resource(c.id, ENERGY, -2.0)])
    }
}

/// Mutual relationship damage from a fight.
const fn hostility(a: CharacterId, b: CharacterId) -> [OutcomeDelta; 2] {
    [
        OutcomeDelta::relationship(a, b, HOSTILITY_PENALTY),
        OutcomeDelta::relationship(b, a, HOSTILITY_PENALTY),
    ]
}

/// Bargaining strength from personality and standing.
fn negotiation_skill(c: &Character) -> f64 {
    c.traits.extraversion.mul_add(
        0.4,
        c.traits
            .agreeableness
            .mul_add(0.3, c.resource(INFLUENCE) * 0.01),
    )
}
