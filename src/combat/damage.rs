//! Damage formulas
//!
//! Every result is clamped at zero. Armor and attack are read through
//! `max(0, _)` so negative stats never produce healing.

/// Basic attack: attack minus defender armor
pub fn basic_attack_damage(attack: i32, defender_armor: i32) -> i32 {
    (attack.max(0) - defender_armor.max(0)).max(0)
}

/// Plasma attack: attack plus half the target's armor (rounded down)
pub fn plasma_damage(attack: i32, target_armor: i32) -> i32 {
    (attack.max(0) + target_armor.max(0) / 2).max(0)
}

/// How a robot scales the damage it receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum DamageModifier {
    /// Damage is taken as-is
    #[default]
    Identity,
    /// Ignore a percentage of incoming damage, rounding the remainder down
    Resistance { percent: i32 },
}

impl DamageModifier {
    pub fn apply(&self, amount: i32) -> i32 {
        let amount = amount.max(0);
        match self {
            DamageModifier::Identity => amount,
            DamageModifier::Resistance { percent } => {
                let kept = i64::from((100 - percent).clamp(0, 100));
                (i64::from(amount) * kept / 100) as i32
            }
        }
    }
}
