//! Terminal front end.

pub mod input;
pub mod render;
pub mod terminal;
