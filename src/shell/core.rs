//! Shell session
//!
//! Opens the archive, runs the startup script and the interactive loop, and
//! repackages the archive when the session ends.

use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use log::{debug, error, info};
use std::fs;
use std::future::Future;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands::{CommandResult, CommandStatus, handle_command, parse_command};
use crate::error::{ArchiveError, ShellError};
use crate::session::{Session, SessionLog};
use crate::shell::config::ShellConfig;
use crate::storage::{VIRTUAL_ROOT, VfsIndex, Workspace, resolve_path};

/// Action recorded whenever the session ends.
pub const EXIT_ACTION: &str = "exit";

/// One shell session: the extracted archive, its index, and the session state.
pub struct Shell {
    workspace: Workspace,
    root: PathBuf,
    index: VfsIndex,
    session: Session,
    startup_script: Option<String>,
}

impl Shell {
    /// Extracts the configured archive and indexes it.
    ///
    /// Fails before any session state exists if the archive is missing or
    /// malformed.
    pub fn open(config: &ShellConfig) -> Result<Self, ShellError> {
        let workspace = Workspace::open(config.vfs_path())?;
        let root = workspace.root()?.to_path_buf();
        let index = VfsIndex::rebuild(&root)?;
        let session = Session::new(
            &config.username,
            &config.hostname,
            SessionLog::new(config.log_path()),
        );

        info!(
            "Opened VFS {} as {}@{} ({} entries)",
            config.vfs_path,
            config.username,
            config.hostname,
            index.len()
        );

        Ok(Self {
            workspace,
            root,
            index,
            session,
            startup_script: config.startup_script.clone(),
        })
    }

    /// Executes one input line and records it in the session log.
    ///
    /// Blank lines do nothing and return `None`. The line is recorded verbatim
    /// after the command has run, except `exit`, which records the exit action.
    pub fn execute(&mut self, line: &str) -> Option<CommandResult> {
        let command = parse_command(line)?;

        let result = if self.workspace.is_open() {
            handle_command(&command, &mut self.session, &mut self.index, &self.root)
        } else {
            CommandResult::failure(ArchiveError::Closed.to_string())
        };

        if result.is_exit() {
            self.record_exit();
        } else {
            self.session.record(line);
        }
        Some(result)
    }

    /// Runs the configured startup script from inside the VFS, line by line.
    ///
    /// A script that is not configured or not present is skipped. Breaks if
    /// the script itself exits or `interrupt` fires between two lines.
    pub async fn run_startup_script<W, F>(
        &mut self,
        out: &mut W,
        mut interrupt: Pin<&mut F>,
    ) -> Result<ControlFlow<()>, ShellError>
    where
        W: Write,
        F: Future<Output = io::Result<()>>,
    {
        let Some(script) = self.startup_script.clone() else {
            return Ok(ControlFlow::Continue(()));
        };

        let real_path = match resolve_path(&self.root, VIRTUAL_ROOT, &script) {
            Ok((real_path, _)) if real_path.is_file() => real_path,
            _ => {
                debug!("Startup script {} not found, skipping", script);
                return Ok(ControlFlow::Continue(()));
            }
        };

        info!("Running startup script {}", script);
        let contents = fs::read_to_string(&real_path)?;
        for line in contents.lines() {
            if interrupted(interrupt.as_mut()).await? {
                info!("Interrupted during startup script");
                self.leave(out)?;
                return Ok(ControlFlow::Break(()));
            }
            if let Some(result) = self.execute(line) {
                render(&result, out)?;
                if result.is_exit() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Runs the startup script and then the interactive loop until `exit`,
    /// end of input, or an interrupt, and always repackages the archive.
    pub async fn run(mut self) -> Result<(), ShellError> {
        let mut stdout = io::stdout();
        let input = BufReader::new(tokio::io::stdin());
        let outcome = self
            .interact(input, &mut stdout, tokio::signal::ctrl_c())
            .await;
        if let Err(e) = &outcome {
            error!("Session ended abnormally: {}", e);
            self.record_exit();
        }
        let closed = self.shutdown();
        outcome.and(closed)
    }

    /// Reads lines from `input` until `exit`, end of input, or `interrupt`.
    ///
    /// The same interrupt future covers the startup script and every read, so
    /// an interrupt delivered at any point ends the session through the exit
    /// path. Does not repackage the archive; see [`Shell::shutdown`].
    pub async fn interact<R, W, F>(
        &mut self,
        input: R,
        out: &mut W,
        interrupt: F,
    ) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        F: Future<Output = io::Result<()>>,
    {
        let mut interrupt = std::pin::pin!(interrupt);
        if self
            .run_startup_script(out, interrupt.as_mut())
            .await?
            .is_break()
        {
            return Ok(());
        }

        let mut lines = input.lines();
        loop {
            write!(out, "{}", self.session.prompt())?;
            out.flush()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                signal = interrupt.as_mut() => {
                    signal?;
                    info!("Interrupted");
                    None
                }
            };

            let Some(line) = line else {
                self.leave(out)?;
                return Ok(());
            };

            if let Some(result) = self.execute(&line) {
                render(&result, out)?;
                if result.is_exit() {
                    return Ok(());
                }
            }
        }
    }

    fn leave<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.record_exit();
        writeln!(out, "\nExiting shell.")?;
        out.flush()
    }

    pub fn record_exit(&mut self) {
        self.session.record(EXIT_ACTION);
    }

    /// Repackages the working area over the archive. Safe to call twice.
    pub fn shutdown(&mut self) -> Result<(), ShellError> {
        self.workspace.close()?;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn index(&self) -> &VfsIndex {
        &self.index
    }

    /// Root of the working area on the host.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_open(&self) -> bool {
        self.workspace.is_open()
    }
}

/// Polls `interrupt` once, after letting pending signal events through.
async fn interrupted<F>(interrupt: Pin<&mut F>) -> io::Result<bool>
where
    F: Future<Output = io::Result<()>>,
{
    tokio::task::yield_now().await;
    tokio::select! {
        biased;
        signal = interrupt => signal.map(|()| true),
        _ = std::future::ready(()) => Ok(false),
    }
}

/// Writes a command result for the user; `clear` resets the terminal.
pub fn render<W: Write>(result: &CommandResult, out: &mut W) -> io::Result<()> {
    if result.status == CommandStatus::ClearScreen {
        out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        return out.flush();
    }
    for line in &result.output {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
