use std::path::{Path, PathBuf};

const BASE_DIR_ENV: &str = "WEB_TRANSLATOR_RUST_DIR";

/// Directory holding settings overrides and the persisted store.
pub(crate) fn base_dir() -> Option<PathBuf> {
    if let Some(dir) = base_dir_override() {
        return Some(dir);
    }
    home_join(".web-translator-rust")
}

pub(crate) fn storage_dir() -> Option<PathBuf> {
    base_dir().map(|dir| dir.join("store"))
}

fn base_dir_override() -> Option<PathBuf> {
    std::env::var(BASE_DIR_ENV).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    })
}

fn home_join(suffix: &str) -> Option<PathBuf> {
    std::env::var("HOME").ok().and_then(|home| {
        let home = home.trim();
        if home.is_empty() {
            None
        } else {
            Some(Path::new(home).join(suffix))
        }
    })
}
