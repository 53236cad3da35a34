//! Shell commands
//!
//! Handles command parsing, dispatch, and the results handed back to the
//! shell for rendering.

pub mod command;
pub mod handlers;
pub mod parser;

pub use command::{Command, CommandResult, CommandStatus};
pub use handlers::handle_command;
pub use parser::parse_command;
