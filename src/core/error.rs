use thiserror::Error;

/// Why a robot's action was refused.
///
/// Rejections never mutate state: no damage, no cooldown, no status change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionRejection {
    #[error("{robot} is stunned and cannot act")]
    Stunned { robot: String },

    #[error("{robot} has no ability at index {index}")]
    UnknownAbility { robot: String, index: usize },

    #[error("{ability} is on cooldown ({remaining} turns left)")]
    OnCooldown { ability: String, remaining: u32 },

    #[error("{ability} needs a target")]
    MissingTarget { ability: String },

    #[error("{robot} has been defeated")]
    ActorDefeated { robot: String },
}

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Battle has already started")]
    BattleAlreadyStarted,

    #[error("Battle is not in progress")]
    BattleNotInProgress,

    #[error("Cannot start a battle without player robots")]
    EmptyRoster,

    #[error("Robot not found at roster index {0}")]
    RobotNotFound(usize),

    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Action rejected: {0}")]
    Rejected(#[from] ActionRejection),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
