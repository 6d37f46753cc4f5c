//! Read-only views of battle state for the presentation layer

use serde::Serialize;

use crate::battle::engine::BattlePhase;
use crate::combat::robot::{Robot, RobotRole};
use crate::core::types::Round;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectSnapshot {
    pub name: String,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilitySnapshot {
    pub name: String,
    pub cooldown: u32,
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotSnapshot {
    pub name: String,
    pub role: RobotRole,
    pub energy: i32,
    pub armor: i32,
    pub base_armor: i32,
    pub attack: i32,
    pub stunned: bool,
    pub effects: Vec<EffectSnapshot>,
    pub abilities: Vec<AbilitySnapshot>,
}

impl RobotSnapshot {
    pub fn is_defeated(&self) -> bool {
        self.energy <= 0
    }
}

impl From<&Robot> for RobotSnapshot {
    fn from(robot: &Robot) -> Self {
        Self {
            name: robot.name().to_string(),
            role: robot.role(),
            energy: robot.energy(),
            armor: robot.armor().current(),
            base_armor: robot.armor().base(),
            attack: robot.attack_power(),
            stunned: robot.is_stunned(),
            effects: robot
                .effects()
                .iter()
                .map(|e| EffectSnapshot {
                    name: e.name().to_string(),
                    remaining: e.remaining(),
                })
                .collect(),
            abilities: robot
                .abilities()
                .iter()
                .map(|a| AbilitySnapshot {
                    name: a.name().to_string(),
                    cooldown: a.cooldown(),
                    ready: a.is_ready(),
                })
                .collect(),
        }
    }
}

/// Everything the display callback needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleSnapshot {
    pub round: Round,
    pub phase: BattlePhase,
    pub boss: RobotSnapshot,
    pub players: Vec<RobotSnapshot>,
}

impl BattleSnapshot {
    pub fn living_players(&self) -> impl Iterator<Item = &RobotSnapshot> {
        self.players.iter().filter(|p| !p.is_defeated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::robot::Archetype;
    use crate::combat::status::StatusEffect;

    #[test]
    fn test_snapshot_copies_stats() {
        let mut robot = Robot::player("Bulwark", Archetype::Defender);
        robot.use_ability(1, None).unwrap();

        let snapshot = RobotSnapshot::from(&robot);

        assert_eq!(snapshot.name, "Bulwark");
        assert_eq!(snapshot.energy, 100);
        assert_eq!(snapshot.armor, 30);
        assert_eq!(snapshot.base_armor, 15);
        assert_eq!(snapshot.effects[0].name, "Shield");
        assert_eq!(snapshot.abilities[1].name, "Super Defense");
        assert!(snapshot.abilities[0].ready);
        assert!(!snapshot.abilities[1].ready);
        assert_eq!(snapshot.abilities[1].cooldown, 4);
    }

    #[test]
    fn test_snapshot_reports_stun() {
        let mut robot = Robot::player("Volt", Archetype::Attacker);
        robot.add_status_effect(StatusEffect::stun(2));

        let snapshot = RobotSnapshot::from(&robot);

        assert!(snapshot.stunned);
        assert_eq!(
            snapshot.effects,
            vec![EffectSnapshot {
                name: "Stun".into(),
                remaining: 2
            }]
        );
    }
}
