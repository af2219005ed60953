use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::errors::FinanceError;

/// Fatal shell error; ends the session.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Failure of a single command; reported and the loop continues.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(err) => CommandError::Core(err),
            CliError::Io(err) => CommandError::Io(err),
            CliError::Dialoguer(err) => CommandError::Dialoguer(err),
            CliError::Readline(err) => CommandError::Message(err.to_string()),
        }
    }
}

pub type CommandResult = Result<(), CommandError>;
