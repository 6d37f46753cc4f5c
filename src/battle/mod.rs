//! Battle system - a robot party against one boss, round by round
//!
//! The engine owns all robots and never blocks on I/O itself: action choices
//! and display go through `TurnController` and `BattleObserver`.

pub mod controller;
pub mod engine;
pub mod log;
pub mod snapshot;

// Re-exports for convenient access
pub use controller::{
    BattleObserver, ChoiceQueue, NullObserver, ScriptedController, TurnChoice, TurnController,
};
pub use engine::{BattleEngine, BattleOutcome, BattlePhase, TurnReport};
pub use log::{BattleEvent, BattleEventType, BattleLog};
pub use snapshot::{AbilitySnapshot, BattleSnapshot, EffectSnapshot, RobotSnapshot};
