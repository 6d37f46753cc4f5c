//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Battle round counter (starts at 1)
pub type Round = u32;

/// Who is acting: a player robot by roster index, or the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorId {
    Player(usize),
    Boss,
}
