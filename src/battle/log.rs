//! Battle event log - every event of a battle, tagged with round and actor

use std::fmt;

use serde::Serialize;

use crate::battle::engine::BattleOutcome;
use crate::combat::events::CombatEvent;
use crate::core::types::{ActorId, Round};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BattleEventType {
    BattleStarted { roster: usize },
    Combat(CombatEvent),
    ActionRejected { reason: String },
    BattleEnded { outcome: BattleOutcome },
}

impl fmt::Display for BattleEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEventType::BattleStarted { roster } => {
                write!(f, "Battle started with {} robots!", roster)
            }
            BattleEventType::Combat(event) => write!(f, "{}", event),
            BattleEventType::ActionRejected { reason } => write!(f, "{}", reason),
            BattleEventType::BattleEnded { outcome } => write!(f, "{}", outcome),
        }
    }
}

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleEvent {
    pub round: Round,
    pub actor: Option<ActorId>,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BattleLog {
    events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: Round, actor: Option<ActorId>, event_type: BattleEventType) {
        let description = event_type.to_string();
        self.events.push(BattleEvent {
            round,
            actor,
            event_type,
            description,
        });
    }

    pub fn extend_combat(
        &mut self,
        round: Round,
        actor: ActorId,
        events: impl IntoIterator<Item = CombatEvent>,
    ) {
        for event in events {
            self.push(round, Some(actor), BattleEventType::Combat(event));
        }
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
