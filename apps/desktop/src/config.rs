//! Application configuration.

use std::path::PathBuf;

/// Where the app keeps its files and how wide it draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Profile document, relative to the working directory.
    pub data_file: PathBuf,
    /// Directory scanned for lesson files.
    pub lessons_dir: PathBuf,
    /// Columns available to lesson views.
    pub surface_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("user_data.json"),
            lessons_dir: PathBuf::from("lessons"),
            surface_width: 72,
        }
    }
}

impl AppConfig {
    /// Config rooted at `dir`.
    #[cfg(test)]
    pub fn in_dir(dir: &std::path::Path) -> Self {
        Self {
            data_file: dir.join("user_data.json"),
            lessons_dir: dir.join("lessons"),
            ..Self::default()
        }
    }
}
