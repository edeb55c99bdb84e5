//! # Error Types for the Line Protocol
//!
//! The tree itself never fails: absent keys resolve to `None`, `0` or an
//! empty list. Errors only arise while turning text into operations, either
//! when reading a bootstrap file or when parsing an interactive command.
//!
//! Parsing always completes before anything is applied to a tree, so an
//! error never leaves a tree half-updated.

use alloc::string::String;

use thiserror::Error;

/// Errors produced while parsing bootstrap input or commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The bootstrap input has no record count line.
    #[error("bootstrap input is empty, expected a record count")]
    MissingRecordCount,

    /// The record count line is not a non-negative integer.
    #[error("line {line}: record count must be a non-negative integer")]
    InvalidRecordCount {
        /// 1-based line number.
        line: usize,
    },

    /// The input ended before the announced number of records.
    #[error("expected {expected} records, found {found}")]
    MissingRecords {
        /// Record count announced on the first line.
        expected: usize,
        /// Records actually present.
        found: usize,
    },

    /// A record line is not exactly two integers.
    #[error("line {line}: expected `<id> <count>`")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
    },

    /// The first token of a command line names no known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A command is missing one of its arguments.
    #[error("`{command}` is missing argument {position}")]
    MissingArgument {
        /// Command name.
        command: &'static str,
        /// 1-based position of the missing argument.
        position: usize,
    },

    /// A command has more arguments than it accepts.
    #[error("`{command}` takes fewer arguments")]
    UnexpectedArgument {
        /// Command name.
        command: &'static str,
    },

    /// An argument is not a 32-bit signed integer.
    #[error("`{0}` is not a 32-bit integer")]
    InvalidInteger(String),
}

/// A Result type alias using our custom Error type.
pub type Result<T> = core::result::Result<T, Error>;
