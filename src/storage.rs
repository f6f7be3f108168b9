use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::paths;

pub const HISTORY_KEY: &str = "translate_history";
pub const FAVORITES_KEY: &str = "translate_favorites";
pub const THEME_KEY: &str = "theme";

/// Key-value persistence port. History, favorites and the theme preference go
/// through this seam so callers never touch the storage mechanism directly.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

/// One JSON document per key under the tool's home directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open_default() -> Result<Self> {
        let dir = paths::storage_dir().ok_or_else(|| anyhow!("HOME is not set"))?;
        Self::open(dir)
    }

    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create store directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read store entry: {}", path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse store entry: {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.key_path(key);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)
            .with_context(|| format!("failed to write store entry: {}", path.display()))?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::with_temp_home;
    use serde_json::json;

    #[test]
    fn round_trips_json_values() {
        with_temp_home(|_| {
            let store = JsonFileStore::open_default().unwrap();
            assert!(store.get("theme").unwrap().is_none());
            store.set("theme", &json!("dark")).unwrap();
            assert_eq!(store.get("theme").unwrap(), Some(json!("dark")));
            store.set("theme", &json!("light")).unwrap();
            assert_eq!(store.get("theme").unwrap(), Some(json!("light")));
        });
    }

    #[test]
    fn keys_are_isolated_files() {
        with_temp_home(|home| {
            let store = JsonFileStore::open_default().unwrap();
            store.set("translate_history", &json!([1, 2])).unwrap();
            store.set("translate_favorites", &json!([])).unwrap();
            let dir = home.join(".web-translator-rust/store");
            assert!(dir.join("translate_history.json").exists());
            assert!(dir.join("translate_favorites.json").exists());
        });
    }
}
