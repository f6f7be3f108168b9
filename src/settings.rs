use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

const DEFAULT_SETTINGS_TOML: &str = include_str!("../settings.toml");

pub const DEFAULT_TIMEOUT_MS: u64 = 8000;
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoints: Vec<String>,
    pub fallback_endpoint: String,
    pub timeout_ms: u64,
    pub dictionary_endpoint: String,
    pub system_languages: Vec<String>,
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            fallback_endpoint: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            dictionary_endpoint: String::new(),
            system_languages: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    translator: Option<TranslatorSettings>,
    dictionary: Option<DictionarySettings>,
    system: Option<SystemSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslatorSettings {
    endpoints: Option<Vec<String>>,
    fallback_endpoint: Option<String>,
    timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct DictionarySettings {
    endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SystemSettings {
    languages: Option<Vec<String>>,
    histories: Option<usize>,
}

pub fn load_settings(extra_path: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::default();

    let embedded: SettingsFile =
        toml::from_str(DEFAULT_SETTINGS_TOML).with_context(|| "failed to parse built-in settings")?;
    settings.merge(embedded);

    let mut ordered_paths = Vec::new();
    ordered_paths.push(PathBuf::from("settings.toml"));
    ordered_paths.push(PathBuf::from("settings.local.toml"));

    if let Some(base) = paths::base_dir() {
        ordered_paths.push(base.join("settings.toml"));
        ordered_paths.push(base.join("settings.local.toml"));
    }

    if let Some(extra) = extra_path {
        if !extra.exists() {
            return Err(anyhow!("settings file not found: {}", extra.display()));
        }
        ordered_paths.push(extra.to_path_buf());
    }

    for path in ordered_paths {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            let parsed: SettingsFile = toml::from_str(&content)
                .with_context(|| format!("failed to parse settings: {}", path.display()))?;
            settings.merge(parsed);
        }
    }

    Ok(settings)
}

impl Settings {
    fn merge(&mut self, incoming: SettingsFile) {
        if let Some(translator) = incoming.translator {
            if let Some(endpoints) = translator.endpoints {
                if !endpoints.is_empty() {
                    self.endpoints = endpoints;
                }
            }
            if let Some(endpoint) = translator.fallback_endpoint {
                if !endpoint.trim().is_empty() {
                    self.fallback_endpoint = endpoint;
                }
            }
            if let Some(timeout) = translator.timeout_ms {
                if timeout > 0 {
                    self.timeout_ms = timeout;
                }
            }
        }
        if let Some(dictionary) = incoming.dictionary {
            if let Some(endpoint) = dictionary.endpoint {
                if !endpoint.trim().is_empty() {
                    self.dictionary_endpoint = endpoint;
                }
            }
        }
        if let Some(system) = incoming.system {
            if let Some(languages) = system.languages {
                if !languages.is_empty() {
                    self.system_languages = languages;
                }
            }
            if let Some(limit) = system.histories {
                if limit > 0 {
                    self.history_limit = limit;
                }
            }
        }
    }
}
