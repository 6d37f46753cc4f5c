//! Timed status effects (stun, shield)
//!
//! An effect lives in its target's effect list, so the target is implicit:
//! `apply` and `tick` receive the pieces of the target they touch.

use serde::{Deserialize, Serialize};

use crate::combat::armor::ArmorRating;
use crate::combat::events::CombatEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Target cannot attack or use abilities
    Stun,
    /// Temporary armor bonus, removed on expiry
    Shield { bonus_armor: i32 },
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Stun => "Stun",
            StatusKind::Shield { .. } => "Shield",
        }
    }
}

/// An active effect with its remaining duration (in status-update ticks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    kind: StatusKind,
    remaining: u32,
}

impl StatusEffect {
    pub fn new(kind: StatusKind, duration: u32) -> Self {
        Self {
            kind,
            remaining: duration,
        }
    }

    pub fn stun(duration: u32) -> Self {
        Self::new(StatusKind::Stun, duration)
    }

    pub fn shield(duration: u32, bonus_armor: i32) -> Self {
        Self::new(StatusKind::Shield { bonus_armor }, duration)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_stun(&self) -> bool {
        matches!(self.kind, StatusKind::Stun)
    }

    /// Apply the effect's entry side effect to its target
    ///
    /// Called exactly once, when the effect is attached. A zero-duration effect
    /// is already finished and changes nothing.
    pub fn apply(&self, target: &str, armor: &mut ArmorRating) -> CombatEvent {
        if let StatusKind::Shield { bonus_armor } = self.kind {
            if !self.is_finished() {
                armor.add_bonus(bonus_armor);
            }
        }

        CombatEvent::StatusApplied {
            robot: target.to_string(),
            status: self.kind,
            duration: self.remaining,
        }
    }

    /// Count down one tick
    ///
    /// Returns the expiry event on the tick that finishes the effect. A shield
    /// hands its armor back at that moment. Ticking a finished effect is a no-op.
    pub fn tick(&mut self, target: &str, armor: &mut ArmorRating) -> Option<CombatEvent> {
        if self.is_finished() {
            return None;
        }

        self.remaining -= 1;
        if !self.is_finished() {
            return None;
        }

        if let StatusKind::Shield { bonus_armor } = self.kind {
            armor.remove_bonus(bonus_armor);
        }

        Some(CombatEvent::StatusExpired {
            robot: target.to_string(),
            status: self.kind,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
