//! UI state for the console battle screen

use std::collections::VecDeque;

use crate::combat::events::CombatEvent;
use crate::core::types::Round;

/// Maximum feed entries to keep
const MAX_FEED_ENTRIES: usize = 12;

/// An entry in the recent-events feed
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub round: Round,
    pub message: String,
    pub category: FeedCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCategory {
    Combat,
    Status,
    Rejected,
    System,
}

impl FeedCategory {
    pub fn of(event: &CombatEvent) -> Self {
        match event {
            CombatEvent::StatusApplied { .. }
            | CombatEvent::StatusExpired { .. }
            | CombatEvent::StunnedSkip { .. } => FeedCategory::Status,
            _ => FeedCategory::Combat,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            FeedCategory::Combat => "*",
            FeedCategory::Status => "~",
            FeedCategory::Rejected => "!",
            FeedCategory::System => "#",
        }
    }
}

/// Rolling window of the most recent battle messages
#[derive(Debug, Default)]
pub struct EventFeed {
    entries: VecDeque<FeedEntry>,
}

impl EventFeed {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_FEED_ENTRIES),
        }
    }

    /// Add an entry, evicting the oldest when full
    pub fn push(&mut self, round: Round, message: String, category: FeedCategory) {
        if self.entries.len() >= MAX_FEED_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(FeedEntry {
            round,
            message,
            category,
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
