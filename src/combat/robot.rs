//! Robots: player archetypes and the boss
//!
//! The boss is a robot built with a damage resistance modifier and the full
//! ability set, not a separate type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::ability::{Ability, AbilityKind};
use crate::combat::armor::ArmorRating;
use crate::combat::constants::{
    ATTACKER_ATTACK_BONUS, BOSS_ARMOR, BOSS_ATTACK, BOSS_DAMAGE_RESISTANCE_PERCENT, BOSS_ENERGY,
    DEFENDER_ARMOR_BONUS, PLAYER_BASE_ARMOR, PLAYER_BASE_ATTACK, PLAYER_BASE_ENERGY,
};
use crate::combat::damage::{basic_attack_damage, DamageModifier};
use crate::combat::events::CombatEvent;
use crate::combat::status::StatusEffect;
use crate::core::error::{ActionRejection, ArenaError};

/// Player robot archetype - fixes ability set and stat deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// +5 attack, Shock Attack and Plasma Attack
    Attacker,
    /// +5 armor, Repair and Super Defense
    Defender,
    /// No stat change, Repair and Shock Attack
    Balanced,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Attacker, Archetype::Defender, Archetype::Balanced];

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Attacker => "Attacker",
            Archetype::Defender => "Defender",
            Archetype::Balanced => "Balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Archetype::Attacker => "Damage specialist with Shock and Plasma attacks",
            Archetype::Defender => "Survival specialist with Repair and Shield",
            Archetype::Balanced => "Mix of offense and defense",
        }
    }

    pub fn abilities(&self) -> [AbilityKind; 2] {
        match self {
            Archetype::Attacker => [AbilityKind::ShockAttack, AbilityKind::PlasmaAttack],
            Archetype::Defender => [AbilityKind::Repair, AbilityKind::SuperDefense],
            Archetype::Balanced => [AbilityKind::Repair, AbilityKind::ShockAttack],
        }
    }
}

impl FromStr for Archetype {
    type Err = ArenaError;

    /// Accepts the archetype name (any case) or its menu number 1-3
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attacker" | "1" => Ok(Archetype::Attacker),
            "defender" | "2" => Ok(Archetype::Defender),
            "balanced" | "3" => Ok(Archetype::Balanced),
            _ => Err(ArenaError::UnknownArchetype(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotRole {
    Player(Archetype),
    Boss,
}

/// A combatant with stats, abilities and active status effects
#[derive(Debug, Clone)]
pub struct Robot {
    name: String,
    role: RobotRole,
    /// Current health; zero or below means defeated
    energy: i32,
    armor: ArmorRating,
    attack: i32,
    abilities: Vec<Ability>,
    /// Kept in application order
    effects: Vec<StatusEffect>,
    damage_modifier: DamageModifier,
}

impl Robot {
    pub fn new(
        name: impl Into<String>,
        role: RobotRole,
        energy: i32,
        armor: i32,
        attack: i32,
        abilities: &[AbilityKind],
        damage_modifier: DamageModifier,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            energy,
            armor: ArmorRating::new(armor),
            attack,
            abilities: abilities.iter().copied().map(Ability::new).collect(),
            effects: Vec::new(),
            damage_modifier,
        }
    }

    /// Build a player robot from its archetype
    pub fn player(name: impl Into<String>, archetype: Archetype) -> Self {
        let (armor, attack) = match archetype {
            Archetype::Attacker => (PLAYER_BASE_ARMOR, PLAYER_BASE_ATTACK + ATTACKER_ATTACK_BONUS),
            Archetype::Defender => (PLAYER_BASE_ARMOR + DEFENDER_ARMOR_BONUS, PLAYER_BASE_ATTACK),
            Archetype::Balanced => (PLAYER_BASE_ARMOR, PLAYER_BASE_ATTACK),
        };

        Self::new(
            name,
            RobotRole::Player(archetype),
            PLAYER_BASE_ENERGY,
            armor,
            attack,
            &archetype.abilities(),
            DamageModifier::Identity,
        )
    }

    /// Build the boss: higher stats, every ability, 20% damage resistance
    pub fn boss(name: impl Into<String>) -> Self {
        Self::new(
            name,
            RobotRole::Boss,
            BOSS_ENERGY,
            BOSS_ARMOR,
            BOSS_ATTACK,
            &AbilityKind::ALL,
            DamageModifier::Resistance {
                percent: BOSS_DAMAGE_RESISTANCE_PERCENT,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> RobotRole {
        self.role
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn armor(&self) -> &ArmorRating {
        &self.armor
    }

    pub fn attack_power(&self) -> i32 {
        self.attack
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn is_defeated(&self) -> bool {
        self.energy <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_defeated()
    }

    pub fn is_stunned(&self) -> bool {
        self.effects.iter().any(|e| e.is_stun() && !e.is_finished())
    }

    /// Basic attack against `target`
    ///
    /// A stunned robot's attack is rejected and nothing changes.
    pub fn attack(&self, target: &mut Robot) -> Result<Vec<CombatEvent>, ActionRejection> {
        if self.is_stunned() {
            tracing::debug!(robot = %self.name, "attack rejected: stunned");
            return Err(self.stunned());
        }

        let damage = basic_attack_damage(self.attack, target.armor.current());
        tracing::debug!(attacker = %self.name, target = %target.name, damage, "basic attack");

        Ok(vec![
            CombatEvent::Attacked {
                attacker: self.name.clone(),
                target: target.name.clone(),
                damage,
            },
            target.receive_damage(damage),
        ])
    }

    /// Take damage after this robot's damage modifier
    ///
    /// Energy may go below zero.
    pub fn receive_damage(&mut self, amount: i32) -> CombatEvent {
        let applied = self.damage_modifier.apply(amount);
        self.energy = self.energy.saturating_sub(applied);

        CombatEvent::DamageTaken {
            robot: self.name.clone(),
            requested: amount.max(0),
            applied,
            energy: self.energy,
        }
    }

    /// Restore energy; there is no upper cap
    pub fn repair(&mut self, amount: i32) -> CombatEvent {
        self.energy = self.energy.saturating_add(amount);

        CombatEvent::Repaired {
            robot: self.name.clone(),
            amount,
            energy: self.energy,
        }
    }

    /// Invoke the ability at `index`
    ///
    /// Rejected when stunned, when the index is out of range, when the ability
    /// is on cooldown, or when it needs a target and `target` is `None`.
    pub fn use_ability(
        &mut self,
        index: usize,
        target: Option<&mut Robot>,
    ) -> Result<Vec<CombatEvent>, ActionRejection> {
        if self.is_stunned() {
            tracing::debug!(robot = %self.name, "ability rejected: stunned");
            return Err(self.stunned());
        }

        let mut ability = *self
            .abilities
            .get(index)
            .ok_or_else(|| ActionRejection::UnknownAbility {
                robot: self.name.clone(),
                index,
            })?;

        let result = ability.invoke(self, target);
        if let Err(rejection) = &result {
            tracing::debug!(robot = %self.name, %rejection, "ability rejected");
        }
        self.abilities[index] = ability;

        result
    }

    /// Attach an effect and run its entry side effect
    pub fn add_status_effect(&mut self, effect: StatusEffect) -> CombatEvent {
        let event = effect.apply(&self.name, &mut self.armor);
        self.effects.push(effect);
        event
    }

    /// Tick every active effect once, then drop the finished ones
    pub fn update_status_effects(&mut self) -> Vec<CombatEvent> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            if let Some(event) = effect.tick(&self.name, &mut self.armor) {
                expired.push(event);
            }
        }
        self.effects.retain(|e| !e.is_finished());

        tracing::trace!(robot = %self.name, active = self.effects.len(), "status effects updated");
        expired
    }

    /// Tick every owned ability's cooldown once
    pub fn tick_cooldowns(&mut self) {
        for ability in self.abilities.iter_mut() {
            ability.tick();
        }
    }

    /// Defeat notice for the boss (`None` while standing, or for player robots)
    pub fn check_defeated(&self) -> Option<CombatEvent> {
        match self.role {
            RobotRole::Boss if self.is_defeated() => Some(CombatEvent::BossDefeated {
                boss: self.name.clone(),
            }),
            _ => None,
        }
    }

    fn stunned(&self) -> ActionRejection {
        ActionRejection::Stunned {
            robot: self.name.clone(),
        }
    }
}
