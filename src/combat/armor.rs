//! Armor rating with a baseline floor
//!
//! Temporary bonuses stack on top of the base value. Removing a bonus never
//! takes the rating below the base, however bonuses overlapped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorRating {
    current: i32,
    base: i32,
}

impl ArmorRating {
    pub fn new(base: i32) -> Self {
        Self {
            current: base,
            base,
        }
    }

    /// Current armor, including active bonuses
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Baseline armor the rating never drops below on bonus removal
    pub fn base(&self) -> i32 {
        self.base
    }

    /// Armor as used in damage math (never negative)
    pub fn effective(&self) -> i32 {
        self.current.max(0)
    }

    pub fn add_bonus(&mut self, bonus: i32) {
        self.current += bonus;
    }

    /// Remove a bonus, flooring at base armor
    pub fn remove_bonus(&mut self, bonus: i32) {
        self.current = (self.current - bonus).max(self.base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_round_trip() {
        let mut armor = ArmorRating::new(10);
        armor.add_bonus(15);
        assert_eq!(armor.current(), 25);
        armor.remove_bonus(15);
        assert_eq!(armor.current(), 10);
    }

    #[test]
    fn test_removal_floors_at_base() {
        let mut armor = ArmorRating::new(10);
        armor.add_bonus(5);
        armor.remove_bonus(15);
        assert_eq!(armor.current(), 10);
    }

    #[test]
    fn test_overlapping_bonuses() {
        let mut armor = ArmorRating::new(10);
        armor.add_bonus(15);
        armor.add_bonus(15);
        assert_eq!(armor.current(), 40);

        armor.remove_bonus(15);
        assert_eq!(armor.current(), 25);
        armor.remove_bonus(15);
        assert_eq!(armor.current(), 10);
    }

    #[test]
    fn test_effective_clamps_negative() {
        let armor = ArmorRating::new(-5);
        assert_eq!(armor.effective(), 0);
        assert_eq!(armor.current(), -5);
    }
}
