//! Profile persistence.

pub mod error;
pub mod repository;

pub use repository::{JsonProfileStore, ProfileRepository};
