//! Profile repository backed by a JSON file.

use crate::store::error::StoreError;
use lesson_core::Profile;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, StoreError>;

/// Storage for the single local profile.
pub trait ProfileRepository {
    /// Read the stored profile. `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<Profile>>;

    /// Overwrite the stored profile.
    fn save(&self, profile: &Profile) -> Result<()>;

    /// Stored profile, or defaults when it is missing or unreadable.
    fn load(&self) -> Profile {
        match self.read() {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(e) => {
                warn!(error = %e, "profile unreadable, starting from defaults");
                Profile::default()
            }
        }
    }
}

/// Profile stored as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ProfileRepository for JsonProfileStore {
    fn read(&self) -> Result<Option<Profile>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved profile");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(Some(Profile::from_json(&content)?))
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let json = profile.to_json()?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::{Reward, ThemeName};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonProfileStore {
        JsonProfileStore::open(dir.path().join("user_data.json"))
    }

    fn file_in(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("user_data.json")
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.read().unwrap().is_none());
        assert_eq!(store.load(), Profile::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        for content in ["{oops", "[]", r#"{"xp": -3}"#] {
            fs::write(file_in(&dir), content).unwrap();
            assert!(store.read().is_err(), "{content} should not parse");
            assert_eq!(store.load(), Profile::default());
        }
    }

    #[test]
    fn saved_profile_loads_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut profile = Profile::default();
        profile.record_completion("l01", Reward::new(25, 20), 1_700_000_000);
        profile.owned_items.push("owl_hat".to_string());
        profile.settings.theme = ThemeName::Dark;

        store.save(&profile).unwrap();
        assert_eq!(store.load(), profile);

        let text = fs::read_to_string(file_in(&dir)).unwrap();
        assert!(text.contains("\n  \"gems\": 25"));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonProfileStore::open(dir.path().join("nope").join("user_data.json"));
        let err = store.save(&Profile::default()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
