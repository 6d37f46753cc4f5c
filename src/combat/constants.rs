//! Combat balance constants - all fixed values in one place
//!
//! There is no runtime override for any of these.

// Player robot base stats (before archetype deltas)
pub const PLAYER_BASE_ENERGY: i32 = 100;
pub const PLAYER_BASE_ARMOR: i32 = 10;
pub const PLAYER_BASE_ATTACK: i32 = 20;

// Archetype deltas
pub const ATTACKER_ATTACK_BONUS: i32 = 5;
pub const DEFENDER_ARMOR_BONUS: i32 = 5;

// Boss stats
pub const BOSS_ENERGY: i32 = 200;
pub const BOSS_ARMOR: i32 = 20;
pub const BOSS_ATTACK: i32 = 30;
/// Percentage of incoming damage the boss ignores (rounded down after reduction)
pub const BOSS_DAMAGE_RESISTANCE_PERCENT: i32 = 20;

// Ability cooldowns (in the owner's turns)
pub const REPAIR_COOLDOWN: u32 = 3;
pub const SHOCK_COOLDOWN: u32 = 4;
pub const PLASMA_COOLDOWN: u32 = 5;
pub const SUPER_DEFENSE_COOLDOWN: u32 = 4;

// Ability effects
pub const REPAIR_AMOUNT: i32 = 40;
pub const SHOCK_DAMAGE: i32 = 20;
pub const SHOCK_STUN_DURATION: u32 = 2;
pub const SHIELD_DURATION: u32 = 3;
pub const SHIELD_BONUS_ARMOR: i32 = 15;
