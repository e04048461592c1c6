use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, MatchSave};

use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub struct SaveManager;

impl SaveManager {
    /// Collect current state from the global session
    pub fn collect_from_session() -> MatchSave {
        crate::state::get_session().to_save()
    }

    /// Apply loaded state to the global session
    pub fn apply_to_session(save: &MatchSave) {
        crate::state::set_session(crate::state::SessionState::from_save(save));
    }

    /// Save the global session under the given key
    pub fn save(key: &str) -> Result<(), SaveError> {
        Self::validate_key(key)?;

        let mut save = Self::collect_from_session();
        save.update_timestamp();

        let path = Self::get_key_path(key);
        Self::save_to_path(&path, &save)?;

        log::info!("Match saved under key '{}'", key);
        Ok(())
    }

    /// Load a save by key and apply it to the global session
    pub fn load(key: &str) -> Result<MatchSave, SaveError> {
        Self::validate_key(key)?;

        let path = Self::get_key_path(key);
        let save = Self::load_from_path(&path)?;

        Self::apply_to_session(&save);

        log::info!("Match loaded from key '{}'", key);
        Ok(save)
    }

    /// Check if a save exists under the given key
    pub fn exists(key: &str) -> bool {
        if Self::validate_key(key).is_err() {
            return false;
        }
        Self::get_key_path(key).exists()
    }

    /// Delete the save stored under the given key
    pub fn clear(key: &str) -> Result<(), SaveError> {
        Self::validate_key(key)?;

        let path = Self::get_key_path(key);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted save key '{}'", key);
        }

        Ok(())
    }

    // Private helper methods

    fn validate_key(key: &str) -> Result<(), SaveError> {
        let valid = !key.is_empty()
            && key.len() <= 64
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SaveError::InvalidKey { key: key.to_string() });
        }
        Ok(())
    }

    fn get_key_path(key: &str) -> PathBuf {
        Self::get_save_dir().join(format!("match_{}.dat", key))
    }

    fn get_save_dir() -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("saves")
    }

    pub fn save_to_path(path: &Path, save: &MatchSave) -> Result<(), SaveError> {
        // Ensure save directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Serialize and compress
        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        // Atomic rename
        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<MatchSave, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let save = decompress_and_deserialize(&data)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}
