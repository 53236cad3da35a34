pub mod commands;
pub mod error;
pub mod navigate;
pub mod session;
pub mod shell;
pub mod storage;

pub use shell::{Shell, ShellConfig};
