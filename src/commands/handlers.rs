//! Command handlers module for the shell.
//!
//! This module defines one handler per command. Handlers read and change the
//! working area only through resolved paths, refresh the index after any
//! mutation, and turn every failure into a user-facing message instead of an
//! error value.

use crate::commands::{Command, CommandResult, CommandStatus};
use crate::error::StorageError;
use crate::navigate::change_directory;
use crate::session::Session;
use crate::storage::VfsIndex;
use crate::storage::filesystem::{copy_file, read_head};
use crate::storage::validation::{normalize_path, resolve_path};
use log::{debug, warn};
use std::path::Path;

/// Lines printed by `head`.
pub const HEAD_LINES: usize = 10;

/// Dispatches a parsed command to its handler.
///
/// # Arguments
///
/// * `command` - The parsed command.
/// * `session` - Session state; only the working directory may change.
/// * `index` - Entry index, replaced wholesale after a successful copy.
/// * `root` - Root of the working area on the host.
///
/// # Returns
///
/// * `CommandResult` - Outcome status and the lines to show the user.
pub fn handle_command(
    command: &Command,
    session: &mut Session,
    index: &mut VfsIndex,
    root: &Path,
) -> CommandResult {
    debug!("Dispatching {:?} in {}", command, session.current_virtual_path());

    let result = match command {
        Command::Ls(path) => handle_cmd_ls(session, index, path.as_deref()),
        Command::Cd(path) => handle_cmd_cd(session, index, path.as_deref()),
        Command::Cp(args) => handle_cmd_cp(session, index, root, args),
        Command::Head(path) => handle_cmd_head(session, root, path.as_deref()),
        Command::Clear => CommandResult::with_status(CommandStatus::ClearScreen),
        Command::Exit => CommandResult::with_status(CommandStatus::Exit),
        Command::Unknown(name) => CommandResult::failure(format!("{}: command not found", name)),
    };

    if let CommandStatus::Failure(reason) = &result.status {
        warn!("Command failed: {}", reason);
    }
    result
}

/// Handles `ls [path]`: immediate children of a directory, one per line.
fn handle_cmd_ls(session: &Session, index: &VfsIndex, path: Option<&str>) -> CommandResult {
    let cwd = session.current_virtual_path();
    let target = path.unwrap_or(cwd);
    let virtual_path = normalize_path(target, cwd);

    if index.is_directory(&virtual_path) {
        CommandResult::success(index.list(&virtual_path))
    } else if index.is_file(&virtual_path) {
        CommandResult::success(vec![target.to_string()])
    } else {
        CommandResult::failure(format!(
            "ls: cannot access '{}': No such file or directory",
            target
        ))
    }
}

/// Handles `cd [path]`: no operand leaves the directory unchanged.
fn handle_cmd_cd(session: &mut Session, index: &VfsIndex, path: Option<&str>) -> CommandResult {
    let Some(target) = path else {
        return CommandResult::success(Vec::new());
    };

    match change_directory(index, session.current_virtual_path(), target) {
        Ok(new_path) => {
            session.set_current_virtual_path(new_path);
            CommandResult::success(Vec::new())
        }
        Err(e) => {
            debug!("cd {} rejected: {}", target, e);
            CommandResult::failure(format!("cd: no such file or directory: {}", target))
        }
    }
}

/// Handles `cp <src> <dest>`: copies one regular file, then rebuilds the index.
fn handle_cmd_cp(
    session: &Session,
    index: &mut VfsIndex,
    root: &Path,
    args: &[String],
) -> CommandResult {
    let [src, dest] = args else {
        return CommandResult::failure("cp: requires source and destination.".into());
    };
    let cwd = session.current_virtual_path();

    let (src_real, src_virtual) = match resolve_path(root, cwd, src) {
        Ok(resolved) => resolved,
        Err(_) => {
            return CommandResult::failure(format!(
                "cp: cannot stat '{}': No such file or directory",
                normalize_path(src, cwd)
            ));
        }
    };
    let (dest_real, dest_virtual) = match resolve_path(root, cwd, dest) {
        Ok(resolved) => resolved,
        Err(e) => {
            return CommandResult::failure(format!(
                "cp: cannot create regular file '{}': {}",
                normalize_path(dest, cwd),
                e
            ));
        }
    };

    if let Err(e) = copy_file(&src_real, &src_virtual, &dest_real, &dest_virtual) {
        let message = match e {
            StorageError::FileNotFound(p) => {
                format!("cp: cannot stat '{}': No such file or directory", p)
            }
            StorageError::IsADirectory(p) => format!("cp: omitting directory '{}'", p),
            StorageError::DestinationIsDirectory(p) => {
                format!("cp: cannot overwrite directory '{}' with non-directory", p)
            }
            StorageError::SameFile { src, dest } => {
                format!("cp: '{}' and '{}' are the same file", src, dest)
            }
            StorageError::IoError(io) => {
                format!("cp: cannot create regular file '{}': {}", dest_virtual, io)
            }
        };
        return CommandResult::failure(message);
    }

    match VfsIndex::rebuild(root) {
        Ok(rebuilt) => {
            *index = rebuilt;
            CommandResult::success(Vec::new())
        }
        Err(e) => CommandResult::failure(format!("cp: failed to refresh index: {}", e)),
    }
}

/// Handles `head <path>`: the first lines of a file.
fn handle_cmd_head(session: &Session, root: &Path, path: Option<&str>) -> CommandResult {
    let Some(target) = path else {
        return CommandResult::failure("head: missing file operand.".into());
    };

    let real_path = match resolve_path(root, session.current_virtual_path(), target) {
        Ok((real_path, _)) if real_path.exists() => real_path,
        _ => {
            return CommandResult::failure(format!(
                "head: cannot open '{}': No such file or directory",
                target
            ));
        }
    };

    match read_head(&real_path, HEAD_LINES) {
        Ok(lines) => CommandResult::success(lines),
        Err(e) => {
            let cause = match e {
                StorageError::IoError(io) => io.to_string(),
                other => other.to_string(),
            };
            CommandResult::failure(format!("head: error reading '{}': {}", target, cause))
        }
    }
}
