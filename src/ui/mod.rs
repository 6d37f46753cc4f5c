//! UI module - console menus and battle screen

pub mod console;
pub mod state;

pub use console::{Console, MainMenuChoice};
pub use state::{EventFeed, FeedCategory, FeedEntry};
