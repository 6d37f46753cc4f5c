//! Combat events - what happened, for display and the battle log

use std::fmt;

use serde::Serialize;

use crate::combat::ability::AbilityKind;
use crate::combat::status::StatusKind;

/// A single observable state change (or deliberate non-change) in combat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CombatEvent {
    Attacked {
        attacker: String,
        target: String,
        damage: i32,
    },
    /// `requested` is the raw damage, `applied` what remained after resistance
    DamageTaken {
        robot: String,
        requested: i32,
        applied: i32,
        energy: i32,
    },
    AbilityUsed {
        robot: String,
        ability: AbilityKind,
    },
    Repaired {
        robot: String,
        amount: i32,
        energy: i32,
    },
    PlasmaFired {
        attacker: String,
        target: String,
        damage: i32,
    },
    StatusApplied {
        robot: String,
        status: StatusKind,
        duration: u32,
    },
    StatusExpired {
        robot: String,
        status: StatusKind,
    },
    TurnSkipped {
        robot: String,
    },
    StunnedSkip {
        robot: String,
    },
    BossDefeated {
        boss: String,
    },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Attacked {
                attacker,
                target,
                damage,
            } => write!(f, "{} attacks {} for {} damage!", attacker, target, damage),
            CombatEvent::DamageTaken {
                robot,
                applied,
                energy,
                ..
            } => write!(f, "{} takes {} damage! Energy left: {}", robot, applied, energy),
            CombatEvent::AbilityUsed { robot, ability } => {
                write!(f, "{} uses {}!", robot, ability.name())
            }
            CombatEvent::Repaired {
                robot,
                amount,
                energy,
            } => write!(f, "{} repairs {} energy! Energy now: {}", robot, amount, energy),
            CombatEvent::PlasmaFired {
                attacker, target, ..
            } => write!(f, "{} fires plasma at {}, piercing its armor!", attacker, target),
            CombatEvent::StatusApplied {
                robot,
                status,
                duration,
            } => match status {
                StatusKind::Stun => write!(
                    f,
                    "{} is stunned! It cannot act for {} turns!",
                    robot, duration
                ),
                StatusKind::Shield { bonus_armor } => write!(
                    f,
                    "{} gains {} armor for {} turns!",
                    robot, bonus_armor, duration
                ),
            },
            CombatEvent::StatusExpired { robot, status } => {
                write!(f, "{} effect on {} has worn off!", status.name(), robot)
            }
            CombatEvent::TurnSkipped { robot } => write!(f, "{} skips its turn.", robot),
            CombatEvent::StunnedSkip { robot } => {
                write!(f, "{} is stunned and loses its turn!", robot)
            }
            CombatEvent::BossDefeated { boss } => write!(f, "Boss {} has been defeated!", boss),
        }
    }
}
