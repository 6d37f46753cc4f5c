//! Combat rules - robots, abilities, status effects and damage math

pub mod ability;
pub mod armor;
pub mod constants;
pub mod damage;
pub mod events;
pub mod robot;
pub mod status;

pub use ability::{Ability, AbilityKind};
pub use armor::ArmorRating;
pub use damage::{basic_attack_damage, plasma_damage, DamageModifier};
pub use events::CombatEvent;
pub use robot::{Archetype, Robot, RobotRole};
pub use status::{StatusEffect, StatusKind};
