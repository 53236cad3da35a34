//! Session management
//!
//! Holds per-session state and the JSON record of executed commands.

pub mod journal;
pub mod state;

pub use journal::{LogEntry, SessionLog};
pub use state::Session;
