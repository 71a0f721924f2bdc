//! Error types for lesson-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing a lesson file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("metadata header opened at line {line} is never closed")]
    UnterminatedHeader { line: usize },

    #[error("malformed header line {line}: expected `key: value`")]
    MalformedHeader { line: usize },

    #[error("invalid order at line {line}: {value}")]
    InvalidOrder { line: usize, value: String },

    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },
}

/// Why a single lesson file was left out of a catalog.
///
/// None of these abort a scan; they are logged and collected as diagnostics.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{path}: {reason}")]
    Shape { path: PathBuf, reason: String },

    #[error("{path}: lesson id '{id}' already loaded from {first}")]
    DuplicateId {
        path: PathBuf,
        id: String,
        first: PathBuf,
    },
}

impl LoadError {
    /// The file this diagnostic refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Shape { path, .. }
            | Self::DuplicateId { path, .. } => path,
        }
    }
}

/// Failure to enumerate the lessons directory itself.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot read lessons directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a builder while constructing a lesson view.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("lesson has no items")]
    NoItems,

    #[error("item {index} has no choices")]
    MissingChoices { index: usize },

    #[error("item {index}: answer '{answer}' is not one of the choices")]
    AnswerNotInChoices { index: usize, answer: String },

    #[error("invalid value for option '{key}': {value}")]
    InvalidOption { key: String, value: String },
}

/// Reasons a shop purchase is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("item not found: {0}")]
    NotFound(String),

    #[error("already owned: {0}")]
    AlreadyOwned(String),

    #[error("not enough gems: need {price}, have {balance}")]
    InsufficientFunds { price: u64, balance: u64 },
}
