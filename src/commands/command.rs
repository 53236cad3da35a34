//! Module `command`
//!
//! Defines the commands the shell understands, their outcome status, and the
//! result structure returned to the shell.

/// A parsed command line.
///
/// Optional operands are `None` when omitted; `Cp` keeps every operand so the
/// handler can report a wrong count.
#[derive(Debug, PartialEq)]
pub enum Command {
    Ls(Option<String>),
    Cd(Option<String>),
    Cp(Vec<String>),
    Head(Option<String>),
    Clear,
    Exit,
    Unknown(String), // Unrecognized command name
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    ClearScreen,
    Exit,
}

/// Struct encapsulating the full result of a command execution.
///
/// `output` holds the lines to show the user, in order, without line endings.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub output: Vec<String>,
}

impl CommandResult {
    pub fn success(output: Vec<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            output,
        }
    }

    /// A failed command whose only output is the user-facing message.
    pub fn failure(message: String) -> Self {
        Self {
            status: CommandStatus::Failure(message.clone()),
            output: vec![message],
        }
    }

    pub fn with_status(status: CommandStatus) -> Self {
        Self {
            status,
            output: Vec::new(),
        }
    }

    pub fn is_exit(&self) -> bool {
        self.status == CommandStatus::Exit
    }
}
