pub mod config;
pub mod error;
pub mod types;

pub use config::ArenaConfig;
pub use error::{ActionRejection, ArenaError};
pub use types::{ActorId, Round};
