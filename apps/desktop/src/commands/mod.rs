//! Commands the user can type on a page.

pub mod catalog;
pub mod leaderboard;
pub mod settings;
pub mod shop;

use lesson_core::{BuildError, PurchaseError, RegistryError};
use std::fmt;

/// A failed command, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<RegistryError> for CommandError {
    fn from(e: RegistryError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<BuildError> for CommandError {
    fn from(e: BuildError) -> Self {
        Self {
            message: format!("Lesson error: {e}"),
        }
    }
}

impl From<PurchaseError> for CommandError {
    fn from(e: PurchaseError) -> Self {
        Self { message: e.to_string() }
    }
}
