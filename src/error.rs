use std::fmt::Display;

use thiserror::Error as ThisError;

/// Prefix for generic errors.
pub const ERR: &str = "ERR";
/// Prefix for type and arity mismatches.
pub const WRONGTYP: &str = "WRONGTYP";

/// Every failure a command can report back to a client.
///
/// The `Display` output is the message sent on the wire, prefix included. `KeyNotFound` is an
/// internal store signal and carries no prefix of its own; the encoder prepends `ERR:` if it
/// ever reaches a client.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CommandError {
    #[error("{key} not found")]
    KeyNotFound { key: String },
    #[error("ERR:unknown command {name}")]
    UnknownCommand { name: String },
    #[error("WRONGTYP:{cmd} has wrong number of arguments")]
    WrongNumberOfArgs { cmd: String },
    #[error("WRONGTYP:invalid operation against key holding invalid type of value")]
    WrongType,
    #[error("ERR:error casting {value} to int")]
    CastFailedToInt { value: String },
    #[error("ERR:{0}")]
    Generic(String),
}

impl CommandError {
    pub fn generic(err: impl Display) -> CommandError {
        CommandError::Generic(err.to_string())
    }

    pub fn wrong_number_of_args(cmd: impl Into<String>) -> CommandError {
        CommandError::WrongNumberOfArgs { cmd: cmd.into() }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            CommandError::KeyNotFound { .. }
            | CommandError::UnknownCommand { .. }
            | CommandError::CastFailedToInt { .. }
            | CommandError::Generic(_) => ERR,
            CommandError::WrongNumberOfArgs { .. } | CommandError::WrongType => WRONGTYP,
        }
    }
}

/// Whether `message` already starts with one of the wire error prefixes.
pub fn has_resp_prefix(message: &str) -> bool {
    message.starts_with(WRONGTYP) || message.starts_with(ERR)
}
