use anyhow::{Result, anyhow};
use std::path::Path;
use std::time::Duration;

pub mod detect;
pub mod dictionary;
pub mod history;
pub mod languages;
pub mod logging;
mod paths;
pub mod providers;
pub mod settings;
pub mod storage;
#[cfg(test)]
mod test_util;
mod translator;

pub use providers::{ProviderFailure, TranslationRequest};
pub use translator::{TranslateError, Translator};

use serde_json::json;
use storage::{KeyValueStore, THEME_KEY};

const USER_AGENT: &str = concat!("web-translator-rust/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub lang: String,
    pub source_lang: String,
    pub define: Option<String>,
    pub favorite: bool,
    pub remove_favorite: Option<usize>,
    pub show_history: bool,
    pub show_favorites: bool,
    pub show_enabled_languages: bool,
    pub theme: Option<String>,
    pub settings_path: Option<String>,
    pub verbose: bool,
}

pub async fn run(config: Config, input: Option<String>) -> Result<String> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let settings = settings::load_settings(settings_path)?;

    if config.show_enabled_languages {
        return Ok(format_enabled_languages(&settings));
    }

    let store = storage::JsonFileStore::open_default()?;
    let log = history::TranslationLog::new(&store, settings.history_limit);

    if let Some(theme) = config.theme.as_deref() {
        return set_theme(&store, theme);
    }
    if config.show_history {
        return Ok(history::render_history(&log.history()?));
    }
    if config.show_favorites {
        return Ok(history::render_favorites(&log.favorites()?));
    }
    if let Some(position) = config.remove_favorite {
        if position == 0 {
            return Err(anyhow!("favorite positions start at 1"));
        }
        let removed = log.remove_favorite(position - 1)?;
        return Ok(format!(
            "removed favorite: {} → {}",
            removed.source_text, removed.translated_text
        ));
    }

    let client = http_client()?;

    if let Some(word) = config.define.as_deref() {
        let entries = dictionary::lookup(&client, &settings.dictionary_endpoint, word).await?;
        // lookup never returns an empty list
        return Ok(dictionary::render_entry(&entries[0]));
    }

    let input = input.unwrap_or_default();
    let text = input.trim();
    if text.is_empty() {
        return Err(TranslateError::EmptyInput.into());
    }

    let target_lang = resolve_target_lang(&config.lang)?;
    let source_lang = resolve_source_lang(&config.source_lang, text)?;

    let translator = Translator::new(
        providers::build_primaries(&client, &settings.endpoints),
        providers::build_secondary(&client, &settings.fallback_endpoint),
        Duration::from_millis(settings.timeout_ms),
    );

    let request = TranslationRequest {
        text: text.to_string(),
        source_lang: source_lang.clone(),
        target_lang: target_lang.clone(),
    };
    let translated = translator.translate(&request).await?;

    // Persistence is the caller's side effect; the orchestrator stays pure.
    let entry = history::HistoryEntry::now(text, &source_lang, &translated, &target_lang);
    log.append_history(entry.clone())?;
    if config.favorite {
        log.add_favorite(entry)?;
    }

    Ok(translated)
}

/// Current persisted theme, defaulting to light.
pub fn current_theme() -> Result<String> {
    let store = storage::JsonFileStore::open_default()?;
    read_theme(&store)
}

/// Saves an already-translated pair to favorites, as the page's favorite
/// button did for the most recent translation.
pub fn save_favorite(
    source_text: &str,
    source_lang: &str,
    translated_text: &str,
    target_lang: &str,
) -> Result<String> {
    let settings = settings::load_settings(None)?;
    let store = storage::JsonFileStore::open_default()?;
    let log = history::TranslationLog::new(&store, settings.history_limit);
    log.add_favorite(history::HistoryEntry::now(
        source_text,
        source_lang,
        translated_text,
        target_lang,
    ))?;
    Ok("added to favorites".to_string())
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| anyhow!("failed to build HTTP client: {err}"))
}

fn resolve_target_lang(code: &str) -> Result<String> {
    let code = code.trim().to_lowercase();
    if !languages::is_valid_code(&code) {
        return Err(anyhow!(
            "unsupported target language '{}' (use --show-enabled-languages)",
            code
        ));
    }
    Ok(code)
}

fn resolve_source_lang(code: &str, text: &str) -> Result<String> {
    let code = code.trim().to_lowercase();
    if code == "auto" {
        let detected =
            detect::detect_language(text).unwrap_or(languages::DEFAULT_SOURCE_LANG);
        return Ok(detected.to_string());
    }
    if !languages::is_valid_code(&code) {
        return Err(anyhow!(
            "unsupported source language '{}' (use --show-enabled-languages or auto)",
            code
        ));
    }
    Ok(code)
}

fn format_enabled_languages(settings: &settings::Settings) -> String {
    let codes: Vec<&str> = if settings.system_languages.is_empty() {
        languages::enabled_codes().collect()
    } else {
        settings.system_languages.iter().map(String::as_str).collect()
    };
    codes
        .iter()
        .map(|code| {
            let display = languages::display_name(code).unwrap_or("unknown");
            format!("{}\t{}", code, display)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_theme(store: &dyn KeyValueStore) -> Result<String> {
    Ok(store
        .get(THEME_KEY)?
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| "light".to_string()))
}

fn set_theme(store: &dyn KeyValueStore, theme: &str) -> Result<String> {
    let theme = theme.trim().to_lowercase();
    if theme != "light" && theme != "dark" {
        return Err(anyhow!("theme must be 'light' or 'dark'"));
    }
    store.set(THEME_KEY, &json!(theme))?;
    Ok(format!("theme set to {theme}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_store::MemoryStore;

    #[test]
    fn theme_defaults_to_light_and_persists() {
        let store = MemoryStore::default();
        assert_eq!(read_theme(&store).unwrap(), "light");
        assert_eq!(set_theme(&store, "dark").unwrap(), "theme set to dark");
        assert_eq!(read_theme(&store).unwrap(), "dark");
        assert!(set_theme(&store, "sepia").is_err());
    }

    #[test]
    fn source_lang_auto_uses_the_detector() {
        assert_eq!(resolve_source_lang("auto", "হ্যালো").unwrap(), "bn");
        assert_eq!(resolve_source_lang("auto", "hello").unwrap(), "en");
        assert_eq!(resolve_source_lang("ru", "whatever").unwrap(), "ru");
        assert!(resolve_source_lang("xx", "whatever").is_err());
    }

    #[test]
    fn target_lang_is_validated() {
        assert_eq!(resolve_target_lang(" BN ").unwrap(), "bn");
        assert!(resolve_target_lang("auto").is_err());
        assert!(resolve_target_lang("xx").is_err());
    }

    #[test]
    fn enabled_languages_listing_is_tab_separated() {
        let settings = settings::Settings {
            system_languages: vec!["en".to_string(), "bn".to_string()],
            ..settings::Settings::default()
        };
        insta::assert_snapshot!(format_enabled_languages(&settings), @r"
        en	English
        bn	Bengali
        ");
    }
}
