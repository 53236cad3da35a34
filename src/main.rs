//! VFS Shell - Entry Point
//!
//! An interactive shell running a handful of file commands against a
//! virtual filesystem extracted from a zip archive.

use log::info;
use std::env;
use std::process::ExitCode;

use vfs_shell::error::ShellError;
use vfs_shell::error::handlers::{exit_code, handle_fatal};
use vfs_shell::{Shell, ShellConfig};

fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: vfs-shell <config.toml>");
        return ExitCode::from(1);
    }

    match run(&args[1]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_fatal(&e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(config_path: &str) -> Result<(), ShellError> {
    let config = ShellConfig::load(config_path)?;
    let shell = Shell::open(&config)?;

    info!("Launching shell...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(shell.run());

    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();
    outcome
}
