//! Seams to the presentation layer: who chooses actions, who displays state

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::battle::engine::{BattleOutcome, TurnReport};
use crate::battle::snapshot::{BattleSnapshot, RobotSnapshot};
use crate::core::types::ActorId;

/// What a player robot does with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnChoice {
    Attack,
    /// Index into the robot's ability list
    Ability(usize),
    Skip,
}

/// Chooses actions for living, unstunned player robots
pub trait TurnController {
    fn choose_action(&mut self, robot: &RobotSnapshot) -> TurnChoice;
}

impl<F> TurnController for F
where
    F: FnMut(&RobotSnapshot) -> TurnChoice,
{
    fn choose_action(&mut self, robot: &RobotSnapshot) -> TurnChoice {
        self(robot)
    }
}

/// Receives battle state before each decision point and after each turn
pub trait BattleObserver {
    fn render(&mut self, snapshot: &BattleSnapshot, next_actor: ActorId);

    fn on_turn(&mut self, _report: &TurnReport) {}

    fn on_finished(&mut self, _outcome: BattleOutcome, _snapshot: &BattleSnapshot) {}
}

/// Observer that ignores everything (headless runs)
#[derive(Debug, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {
    fn render(&mut self, _snapshot: &BattleSnapshot, _next_actor: ActorId) {}
}

/// Uses the first ready ability, otherwise attacks
#[derive(Debug, Default)]
pub struct ScriptedController;

impl TurnController for ScriptedController {
    fn choose_action(&mut self, robot: &RobotSnapshot) -> TurnChoice {
        robot
            .abilities
            .iter()
            .position(|a| a.ready)
            .map(TurnChoice::Ability)
            .unwrap_or(TurnChoice::Attack)
    }
}

/// Replays a fixed list of choices, then skips
#[derive(Debug, Default)]
pub struct ChoiceQueue {
    choices: VecDeque<TurnChoice>,
}

impl ChoiceQueue {
    pub fn new(choices: impl IntoIterator<Item = TurnChoice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl TurnController for ChoiceQueue {
    fn choose_action(&mut self, _robot: &RobotSnapshot) -> TurnChoice {
        self.choices.pop_front().unwrap_or(TurnChoice::Skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::robot::{Archetype, Robot};

    #[test]
    fn test_scripted_prefers_ready_ability() {
        let mut robot = Robot::player("Volt", Archetype::Attacker);
        let mut controller = ScriptedController;

        let choice = controller.choose_action(&RobotSnapshot::from(&robot));
        assert_eq!(choice, TurnChoice::Ability(0));

        let mut boss = Robot::boss("Mega Boss");
        robot.use_ability(0, Some(&mut boss)).unwrap();
        let choice = controller.choose_action(&RobotSnapshot::from(&robot));
        assert_eq!(choice, TurnChoice::Ability(1));

        robot.use_ability(1, Some(&mut boss)).unwrap();
        let choice = controller.choose_action(&RobotSnapshot::from(&robot));
        assert_eq!(choice, TurnChoice::Attack);
    }

    #[test]
    fn test_choice_queue_falls_back_to_skip() {
        let robot = RobotSnapshot::from(&Robot::player("B", Archetype::Balanced));
        let mut queue = ChoiceQueue::new([TurnChoice::Attack, TurnChoice::Ability(1)]);

        assert_eq!(queue.choose_action(&robot), TurnChoice::Attack);
        assert_eq!(queue.choose_action(&robot), TurnChoice::Ability(1));
        assert_eq!(queue.remaining(), 0);
        assert_eq!(queue.choose_action(&robot), TurnChoice::Skip);
    }

    #[test]
    fn test_closure_controller() {
        let robot = RobotSnapshot::from(&Robot::player("B", Archetype::Balanced));
        let mut calls = 0;
        let mut controller = |_: &RobotSnapshot| {
            calls += 1;
            TurnChoice::Skip
        };

        assert_eq!(controller.choose_action(&robot), TurnChoice::Skip);
        drop(controller);
        assert_eq!(calls, 1);
    }
}
