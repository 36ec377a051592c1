pub mod output;
mod shell;

pub use shell::run_cli;

use thiserror::Error;

use crate::errors::LedgerError;

/// Errors surfaced by the CLI surface itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
