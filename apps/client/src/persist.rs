//! Key-value persistence adapter: one JSON file per key under the platform
//! data directory. Backs the mock gateway's favorites/mistakes/sets so they
//! survive restarts; the engine itself never touches this directly.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

pub struct KvStore {
    base_dir: PathBuf,
}

impl KvStore {
    pub fn open() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intelliview");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    /// Missing or unreadable keys fall back to `T::default()`.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.file_path(key);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    /// Atomic write: serialize to a tmp file, fsync, then rename over the
    /// target so a crash never leaves a half-written value.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(value)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
