//! Cooldown-gated abilities
//!
//! Each ability is Ready (cooldown 0) or OnCooldown. Invoking sets the cooldown
//! to the ability's maximum; the owner ticks it down once per turn.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    PLASMA_COOLDOWN, REPAIR_AMOUNT, REPAIR_COOLDOWN, SHIELD_BONUS_ARMOR, SHIELD_DURATION,
    SHOCK_COOLDOWN, SHOCK_DAMAGE, SHOCK_STUN_DURATION, SUPER_DEFENSE_COOLDOWN,
};
use crate::combat::damage::plasma_damage;
use crate::combat::events::CombatEvent;
use crate::combat::robot::Robot;
use crate::combat::status::StatusEffect;
use crate::core::error::ActionRejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Heals the user
    Repair,
    /// Fixed damage and a stun on the target
    ShockAttack,
    /// Damage that grows with the target's armor
    PlasmaAttack,
    /// Temporary shield on the user
    SuperDefense,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::Repair,
        AbilityKind::ShockAttack,
        AbilityKind::PlasmaAttack,
        AbilityKind::SuperDefense,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AbilityKind::Repair => "Repair",
            AbilityKind::ShockAttack => "Shock Attack",
            AbilityKind::PlasmaAttack => "Plasma Attack",
            AbilityKind::SuperDefense => "Super Defense",
        }
    }

    pub fn max_cooldown(&self) -> u32 {
        match self {
            AbilityKind::Repair => REPAIR_COOLDOWN,
            AbilityKind::ShockAttack => SHOCK_COOLDOWN,
            AbilityKind::PlasmaAttack => PLASMA_COOLDOWN,
            AbilityKind::SuperDefense => SUPER_DEFENSE_COOLDOWN,
        }
    }
}

/// An owned ability instance with its cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    kind: AbilityKind,
    cooldown: u32,
}

impl Ability {
    pub fn new(kind: AbilityKind) -> Self {
        Self { kind, cooldown: 0 }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Turns left before the ability is ready
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }

    /// Count the cooldown down by one, stopping at zero
    pub fn tick(&mut self) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }

    /// Use the ability
    ///
    /// Fails without side effects when on cooldown, or when the ability needs
    /// a target and none was given. Repair and Super Defense ignore `target`.
    pub fn invoke(
        &mut self,
        user: &mut Robot,
        target: Option<&mut Robot>,
    ) -> Result<Vec<CombatEvent>, ActionRejection> {
        if !self.is_ready() {
            return Err(ActionRejection::OnCooldown {
                ability: self.name().to_string(),
                remaining: self.cooldown,
            });
        }

        let used = CombatEvent::AbilityUsed {
            robot: user.name().to_string(),
            ability: self.kind,
        };

        let events = match self.kind {
            AbilityKind::Repair => vec![used, user.repair(REPAIR_AMOUNT)],
            AbilityKind::SuperDefense => {
                let shield = StatusEffect::shield(SHIELD_DURATION, SHIELD_BONUS_ARMOR);
                vec![used, user.add_status_effect(shield)]
            }
            AbilityKind::ShockAttack => {
                let target = target.ok_or_else(|| self.missing_target())?;
                vec![
                    used,
                    target.receive_damage(SHOCK_DAMAGE),
                    target.add_status_effect(StatusEffect::stun(SHOCK_STUN_DURATION)),
                ]
            }
            AbilityKind::PlasmaAttack => {
                let target = target.ok_or_else(|| self.missing_target())?;
                let damage = plasma_damage(user.attack_power(), target.armor().current());
                let fired = CombatEvent::PlasmaFired {
                    attacker: user.name().to_string(),
                    target: target.name().to_string(),
                    damage,
                };
                vec![used, fired, target.receive_damage(damage)]
            }
        };

        self.cooldown = self.kind.max_cooldown();
        tracing::debug!(
            user = user.name(),
            ability = self.name(),
            cooldown = self.cooldown,
            "ability used"
        );

        Ok(events)
    }

    fn missing_target(&self) -> ActionRejection {
        ActionRejection::MissingTarget {
            ability: self.name().to_string(),
        }
    }
}
