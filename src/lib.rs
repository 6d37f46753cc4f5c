//! Robot Arena - turn-based battle simulator: a robot party against a boss

pub mod battle;
pub mod combat;
pub mod core;
pub mod ui;
