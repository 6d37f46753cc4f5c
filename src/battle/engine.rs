//! Battle engine - round loop and win/loss state machine
//!
//! Each round: outcome check -> each living player robot acts -> boss acts ->
//! round counter advances.

use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::battle::controller::{BattleObserver, TurnChoice, TurnController};
use crate::battle::log::{BattleEventType, BattleLog};
use crate::battle::snapshot::{BattleSnapshot, RobotSnapshot};
use crate::combat::events::CombatEvent;
use crate::combat::robot::{Archetype, Robot};
use crate::core::error::{ActionRejection, ArenaError, Result};
use crate::core::types::{ActorId, Round};

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    RosterBuilding,
    InProgress,
    PlayerVictory,
    BossVictory,
}

impl BattlePhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, BattlePhase::PlayerVictory | BattlePhase::BossVictory)
    }
}

/// Battle outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    PlayerVictory,
    BossVictory,
}

impl From<BattleOutcome> for BattlePhase {
    fn from(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::PlayerVictory => BattlePhase::PlayerVictory,
            BattleOutcome::BossVictory => BattlePhase::BossVictory,
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::PlayerVictory => write!(f, "PLAYERS WIN! The boss has been defeated!"),
            BattleOutcome::BossVictory => {
                write!(f, "BOSS WINS! Every player robot has been defeated!")
            }
        }
    }
}

/// What happened during one actor's turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub actor: ActorId,
    pub robot: String,
    /// `None` when the turn was lost to a stun or skipped by the engine
    pub choice: Option<TurnChoice>,
    /// Player robot the boss attacked
    pub target: Option<usize>,
    pub events: Vec<CombatEvent>,
    pub rejection: Option<ActionRejection>,
}

/// Complete battle state
pub struct BattleEngine<R: Rng> {
    players: Vec<Robot>,
    boss: Robot,
    round: Round,
    phase: BattlePhase,
    rng: R,
    log: BattleLog,
}

impl BattleEngine<ChaCha8Rng> {
    /// Engine with a deterministic ChaCha8 source for boss targeting
    pub fn with_seed(boss_name: impl Into<String>, seed: u64) -> Self {
        Self::new(boss_name, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> BattleEngine<R> {
    pub fn new(boss_name: impl Into<String>, rng: R) -> Self {
        Self {
            players: Vec::new(),
            boss: Robot::boss(boss_name),
            round: 1,
            phase: BattlePhase::RosterBuilding,
            rng,
            log: BattleLog::new(),
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn players(&self) -> &[Robot] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Robot> {
        self.players.get(index)
    }

    pub fn boss(&self) -> &Robot {
        &self.boss
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::PlayerVictory => Some(BattleOutcome::PlayerVictory),
            BattlePhase::BossVictory => Some(BattleOutcome::BossVictory),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.round,
            phase: self.phase,
            boss: RobotSnapshot::from(&self.boss),
            players: self.players.iter().map(RobotSnapshot::from).collect(),
        }
    }

    /// Add a player robot to the roster (before the battle starts)
    pub fn add_robot(&mut self, name: impl Into<String>, archetype: Archetype) -> Result<usize> {
        if self.phase != BattlePhase::RosterBuilding {
            return Err(ArenaError::BattleAlreadyStarted);
        }

        let robot = Robot::player(name, archetype);
        tracing::info!(name = robot.name(), archetype = archetype.name(), "robot added to roster");
        self.players.push(robot);
        Ok(self.players.len() - 1)
    }

    /// Start the battle (transition from roster building to in progress)
    pub fn start(&mut self) -> Result<()> {
        if self.phase != BattlePhase::RosterBuilding {
            return Err(ArenaError::BattleAlreadyStarted);
        }
        if self.players.is_empty() {
            return Err(ArenaError::EmptyRoster);
        }

        self.phase = BattlePhase::InProgress;
        self.log.push(
            self.round,
            None,
            BattleEventType::BattleStarted {
                roster: self.players.len(),
            },
        );
        tracing::info!(roster = self.players.len(), boss = self.boss.name(), "battle started");
        Ok(())
    }

    /// Settle the battle if one side is out
    ///
    /// The party losing takes precedence over the boss falling. Once decided,
    /// keeps returning the same outcome.
    pub fn check_outcome(&mut self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::RosterBuilding => return None,
            BattlePhase::PlayerVictory | BattlePhase::BossVictory => return self.outcome(),
            BattlePhase::InProgress => {}
        }

        let outcome = if self.players.iter().all(Robot::is_defeated) {
            BattleOutcome::BossVictory
        } else if self.boss.is_defeated() {
            if let Some(event) = self.boss.check_defeated() {
                self.log.extend_combat(self.round, ActorId::Boss, [event]);
            }
            BattleOutcome::PlayerVictory
        } else {
            return None;
        };

        self.phase = outcome.into();
        self.log
            .push(self.round, None, BattleEventType::BattleEnded { outcome });
        tracing::info!(round = self.round, ?outcome, "battle ended");
        Some(outcome)
    }

    /// Resolve one player robot's turn
    ///
    /// A stunned robot loses the turn and `choice` is ignored. Afterwards the
    /// robot's ability cooldowns and status effects tick, rejected or not.
    pub fn play_player_turn(&mut self, index: usize, choice: TurnChoice) -> Result<TurnReport> {
        self.ensure_in_progress()?;

        let robot = self
            .players
            .get_mut(index)
            .ok_or(ArenaError::RobotNotFound(index))?;
        if robot.is_defeated() {
            return Err(ActionRejection::ActorDefeated {
                robot: robot.name().to_string(),
            }
            .into());
        }

        let boss = &mut self.boss;
        let (choice, result) = if robot.is_stunned() {
            let skipped = CombatEvent::StunnedSkip {
                robot: robot.name().to_string(),
            };
            (None, Ok(vec![skipped]))
        } else {
            let result = match choice {
                TurnChoice::Attack => robot.attack(boss),
                TurnChoice::Ability(ability) => robot.use_ability(ability, Some(boss)),
                TurnChoice::Skip => Ok(vec![CombatEvent::TurnSkipped {
                    robot: robot.name().to_string(),
                }]),
            };
            (Some(choice), result)
        };

        let (mut events, rejection) = match result {
            Ok(events) => (events, None),
            Err(rejection) => (Vec::new(), Some(rejection)),
        };

        robot.tick_cooldowns();
        events.extend(robot.update_status_effects());

        tracing::debug!(round = self.round, robot = robot.name(), ?choice, "player turn");
        let report = TurnReport {
            actor: ActorId::Player(index),
            robot: robot.name().to_string(),
            choice,
            target: None,
            events,
            rejection,
        };
        self.record(&report);
        Ok(report)
    }

    /// Resolve the boss's turn against a random living player robot
    ///
    /// With no living target the turn is skipped entirely.
    pub fn play_boss_turn(&mut self) -> Result<TurnReport> {
        self.ensure_in_progress()?;

        if self.boss.is_defeated() {
            return Err(ActionRejection::ActorDefeated {
                robot: self.boss.name().to_string(),
            }
            .into());
        }

        let living: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, robot)| robot.is_alive())
            .map(|(index, _)| index)
            .collect();

        let mut report = TurnReport {
            actor: ActorId::Boss,
            robot: self.boss.name().to_string(),
            choice: None,
            target: None,
            events: Vec::new(),
            rejection: None,
        };

        let Some(&target) = living.choose(&mut self.rng) else {
            tracing::debug!(round = self.round, "boss has no living target");
            return Ok(report);
        };

        report.choice = Some(TurnChoice::Attack);
        report.target = Some(target);
        match self.boss.attack(&mut self.players[target]) {
            Ok(events) => report.events = events,
            Err(rejection) => report.rejection = Some(rejection),
        }
        report.events.extend(self.boss.update_status_effects());

        tracing::debug!(round = self.round, target, "boss turn");
        self.record(&report);
        Ok(report)
    }

    /// Advance the round counter
    pub fn finish_round(&mut self) {
        tracing::info!(round = self.round, boss_energy = self.boss.energy(), "round finished");
        self.round += 1;
    }

    /// Play one full round
    ///
    /// Returns the outcome once the battle is decided. Player turns stop early
    /// if the boss falls mid-round.
    pub fn run_round(
        &mut self,
        controller: &mut impl TurnController,
        observer: &mut impl BattleObserver,
    ) -> Result<Option<BattleOutcome>> {
        self.run_round_with(&mut Frontend {
            controller,
            observer,
        })
    }

    /// `run_round` for a presentation layer that both chooses and displays
    pub fn run_round_with<F>(&mut self, frontend: &mut F) -> Result<Option<BattleOutcome>>
    where
        F: TurnController + BattleObserver,
    {
        if let Some(outcome) = self.check_outcome() {
            return Ok(Some(outcome));
        }
        self.ensure_in_progress()?;

        for index in 0..self.players.len() {
            if self.boss.is_defeated() {
                break;
            }
            if self.players[index].is_defeated() {
                continue;
            }

            frontend.render(&self.snapshot(), ActorId::Player(index));
            let choice = if self.players[index].is_stunned() {
                TurnChoice::Skip
            } else {
                frontend.choose_action(&RobotSnapshot::from(&self.players[index]))
            };
            let report = self.play_player_turn(index, choice)?;
            frontend.on_turn(&report);
        }

        if self.boss.is_alive() {
            frontend.render(&self.snapshot(), ActorId::Boss);
            let report = self.play_boss_turn()?;
            frontend.on_turn(&report);
        }

        self.finish_round();
        Ok(self.check_outcome())
    }

    /// Play rounds until one side wins
    pub fn run(
        &mut self,
        controller: &mut impl TurnController,
        observer: &mut impl BattleObserver,
    ) -> Result<BattleOutcome> {
        self.run_with(&mut Frontend {
            controller,
            observer,
        })
    }

    pub fn run_with<F>(&mut self, frontend: &mut F) -> Result<BattleOutcome>
    where
        F: TurnController + BattleObserver,
    {
        loop {
            if let Some(outcome) = self.run_round_with(frontend)? {
                frontend.on_finished(outcome, &self.snapshot());
                return Ok(outcome);
            }
        }
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.phase == BattlePhase::InProgress {
            Ok(())
        } else {
            Err(ArenaError::BattleNotInProgress)
        }
    }

    fn record(&mut self, report: &TurnReport) {
        if let Some(rejection) = &report.rejection {
            self.log.push(
                self.round,
                Some(report.actor),
                BattleEventType::ActionRejected {
                    reason: rejection.to_string(),
                },
            );
        }
        self.log
            .extend_combat(self.round, report.actor, report.events.iter().cloned());
    }
}

/// Pairs a separate controller and observer into one frontend
struct Frontend<'a, C, O> {
    controller: &'a mut C,
    observer: &'a mut O,
}

impl<C: TurnController, O> TurnController for Frontend<'_, C, O> {
    fn choose_action(&mut self, robot: &RobotSnapshot) -> TurnChoice {
        self.controller.choose_action(robot)
    }
}

impl<C, O: BattleObserver> BattleObserver for Frontend<'_, C, O> {
    fn render(&mut self, snapshot: &BattleSnapshot, next_actor: ActorId) {
        self.observer.render(snapshot, next_actor);
    }

    fn on_turn(&mut self, report: &TurnReport) {
        self.observer.on_turn(report);
    }

    fn on_finished(&mut self, outcome: BattleOutcome, snapshot: &BattleSnapshot) {
        self.observer.on_finished(outcome, snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::controller::NullObserver;
    use crate::combat::status::StatusEffect;
    use rand::rngs::mock::StepRng;

    fn engine_with(archetypes: &[Archetype]) -> BattleEngine<StepRng> {
        let mut engine = BattleEngine::new("Mega Boss", StepRng::new(0, 0));
        for (i, archetype) in archetypes.iter().enumerate() {
            engine.add_robot(format!("R{}", i), *archetype).unwrap();
        }
        engine
    }

    #[test]
    fn test_new_engine_builds_roster() {
        let engine = engine_with(&[Archetype::Attacker, Archetype::Defender]);
        assert_eq!(engine.phase(), BattlePhase::RosterBuilding);
        assert_eq!(engine.players().len(), 2);
        assert_eq!(engine.round(), 1);
        assert_eq!(engine.boss().energy(), 200);
    }

    #[test]
    fn test_start_requires_roster() {
        let mut engine = engine_with(&[]);
        assert!(matches!(engine.start(), Err(ArenaError::EmptyRoster)));
        assert_eq!(engine.phase(), BattlePhase::RosterBuilding);
    }

    #[test]
    fn test_roster_locked_after_start() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();

        assert!(matches!(
            engine.add_robot("Late", Archetype::Attacker),
            Err(ArenaError::BattleAlreadyStarted)
        ));
        assert!(matches!(engine.start(), Err(ArenaError::BattleAlreadyStarted)));
    }

    #[test]
    fn test_turns_require_started_battle() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        assert!(matches!(
            engine.play_player_turn(0, TurnChoice::Attack),
            Err(ArenaError::BattleNotInProgress)
        ));
        assert!(matches!(engine.play_boss_turn(), Err(ArenaError::BattleNotInProgress)));
    }

    #[test]
    fn test_unknown_roster_index() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        assert!(matches!(
            engine.play_player_turn(3, TurnChoice::Attack),
            Err(ArenaError::RobotNotFound(3))
        ));
    }

    #[test]
    fn test_attack_turn_damages_boss() {
        let mut engine = engine_with(&[Archetype::Attacker]);
        engine.start().unwrap();

        let report = engine.play_player_turn(0, TurnChoice::Attack).unwrap();

        assert_eq!(engine.boss().energy(), 196);
        assert_eq!(report.choice, Some(TurnChoice::Attack));
        assert!(report.rejection.is_none());
    }

    #[test]
    fn test_rejected_ability_still_ticks_cooldowns() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();

        engine.play_player_turn(0, TurnChoice::Ability(0)).unwrap();
        assert_eq!(engine.player(0).unwrap().abilities()[0].cooldown(), 2);

        let report = engine.play_player_turn(0, TurnChoice::Ability(0)).unwrap();
        assert!(matches!(
            report.rejection,
            Some(ActionRejection::OnCooldown { remaining: 2, .. })
        ));
        assert_eq!(engine.player(0).unwrap().abilities()[0].cooldown(), 1);
        assert_eq!(engine.player(0).unwrap().energy(), 140);
    }

    #[test]
    fn test_stunned_player_loses_turn_but_effects_tick() {
        let mut engine = engine_with(&[Archetype::Attacker]);
        engine.start().unwrap();
        engine.players[0].add_status_effect(StatusEffect::stun(2));

        let report = engine.play_player_turn(0, TurnChoice::Attack).unwrap();
        assert_eq!(report.choice, None);
        assert_eq!(engine.boss().energy(), 200);
        assert!(engine.player(0).unwrap().is_stunned());

        engine.play_player_turn(0, TurnChoice::Attack).unwrap();
        assert!(!engine.player(0).unwrap().is_stunned());

        engine.play_player_turn(0, TurnChoice::Attack).unwrap();
        assert_eq!(engine.boss().energy(), 196);
    }

    #[test]
    fn test_boss_attacks_living_player() {
        let mut engine = engine_with(&[Archetype::Balanced, Archetype::Defender]);
        engine.start().unwrap();
        engine.players[0].receive_damage(100);

        let report = engine.play_boss_turn().unwrap();

        assert_eq!(report.target, Some(1));
        assert_eq!(engine.player(1).unwrap().energy(), 85);
    }

    #[test]
    fn test_stunned_boss_attack_rejected_and_stun_ticks() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        engine.play_player_turn(0, TurnChoice::Ability(1)).unwrap();
        assert!(engine.boss().is_stunned());

        let report = engine.play_boss_turn().unwrap();
        assert!(matches!(report.rejection, Some(ActionRejection::Stunned { .. })));
        assert_eq!(engine.player(0).unwrap().energy(), 100);

        engine.play_boss_turn().unwrap();
        assert!(!engine.boss().is_stunned());
    }

    #[test]
    fn test_boss_victory_when_party_down() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        engine.players[0].receive_damage(100);

        assert_eq!(engine.check_outcome(), Some(BattleOutcome::BossVictory));
        assert_eq!(engine.phase(), BattlePhase::BossVictory);
        assert!(matches!(
            engine.play_boss_turn(),
            Err(ArenaError::BattleNotInProgress)
        ));
    }

    #[test]
    fn test_party_loss_takes_precedence() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        engine.players[0].receive_damage(100);
        engine.boss.receive_damage(1000);

        assert_eq!(engine.check_outcome(), Some(BattleOutcome::BossVictory));
    }

    #[test]
    fn test_player_victory_logs_boss_defeat() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        engine.boss.receive_damage(1000);

        assert_eq!(engine.check_outcome(), Some(BattleOutcome::PlayerVictory));
        let defeated = engine.log().events().iter().any(|e| {
            matches!(
                e.event_type,
                BattleEventType::Combat(CombatEvent::BossDefeated { .. })
            )
        });
        assert!(defeated);
    }

    #[test]
    fn test_run_round_advances_counter() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        let mut skip = |_: &RobotSnapshot| TurnChoice::Skip;

        let outcome = engine.run_round(&mut skip, &mut NullObserver).unwrap();

        assert_eq!(outcome, None);
        assert_eq!(engine.round(), 2);
        assert_eq!(engine.player(0).unwrap().energy(), 80);
    }

    #[test]
    fn test_run_round_skips_remaining_players_after_boss_falls() {
        let mut engine = engine_with(&[Archetype::Attacker, Archetype::Attacker]);
        engine.start().unwrap();
        engine.boss.receive_damage(245);
        assert_eq!(engine.boss().energy(), 4);

        let mut asked = 0;
        let mut attack = |_: &RobotSnapshot| {
            asked += 1;
            TurnChoice::Attack
        };
        let outcome = engine.run_round(&mut attack, &mut NullObserver).unwrap();

        assert_eq!(outcome, Some(BattleOutcome::PlayerVictory));
        assert_eq!(asked, 1);
    }

    #[test]
    fn test_boss_turn_without_living_target_is_skipped() {
        let mut engine = engine_with(&[Archetype::Balanced]);
        engine.start().unwrap();
        engine.play_player_turn(0, TurnChoice::Ability(1)).unwrap();
        assert_eq!(engine.boss().effects()[0].remaining(), 2);
        engine.players[0].receive_damage(1000);
        let log_len = engine.log().len();

        let report = engine.play_boss_turn().unwrap();

        assert_eq!(report.actor, ActorId::Boss);
        assert_eq!(report.choice, None);
        assert_eq!(report.target, None);
        assert!(report.events.is_empty());
        assert!(report.rejection.is_none());
        assert_eq!(engine.boss().effects()[0].remaining(), 2);
        assert_eq!(engine.log().len(), log_len);
    }
}
