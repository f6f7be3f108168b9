use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description;

use crate::storage::{FAVORITES_KEY, HISTORY_KEY, KeyValueStore};

/// A remembered translation. Favorites share the shape; only the history
/// list is time-evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub source_text: String,
    pub source_lang: String,
    pub translated_text: String,
    pub target_lang: String,
    /// Unix milliseconds.
    pub when: i64,
}

impl HistoryEntry {
    pub fn now(
        source_text: impl Into<String>,
        source_lang: impl Into<String>,
        translated_text: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        let when = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        Self {
            source_text: source_text.into(),
            source_lang: source_lang.into(),
            translated_text: translated_text.into(),
            target_lang: target_lang.into(),
            when,
        }
    }
}

/// History and favorites over the persistence port. Lists are re-read from
/// the store on every operation; nothing is cached in memory.
pub struct TranslationLog<'a> {
    store: &'a dyn KeyValueStore,
    limit: usize,
}

impl<'a> TranslationLog<'a> {
    pub fn new(store: &'a dyn KeyValueStore, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Appends to history, dropping the oldest entries past the cap.
    pub fn append_history(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.read_list(HISTORY_KEY)?;
        entries.push(entry);
        if entries.len() > self.limit {
            let excess = entries.len() - self.limit;
            entries.drain(..excess);
        }
        self.write_list(HISTORY_KEY, &entries)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.read_list(HISTORY_KEY)
    }

    /// Favorites are explicit: added here, removed only by `remove_favorite`.
    pub fn add_favorite(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.read_list(FAVORITES_KEY)?;
        entries.push(entry);
        if entries.len() > self.limit {
            let excess = entries.len() - self.limit;
            entries.drain(..excess);
        }
        self.write_list(FAVORITES_KEY, &entries)
    }

    pub fn favorites(&self) -> Result<Vec<HistoryEntry>> {
        self.read_list(FAVORITES_KEY)
    }

    /// Removes by position in stored order (the order `favorites` returns).
    pub fn remove_favorite(&self, index: usize) -> Result<HistoryEntry> {
        let mut entries = self.read_list(FAVORITES_KEY)?;
        if index >= entries.len() {
            return Err(anyhow!(
                "no favorite at position {} (have {})",
                index + 1,
                entries.len()
            ));
        }
        let removed = entries.remove(index);
        self.write_list(FAVORITES_KEY, &entries)?;
        Ok(removed)
    }

    fn read_list(&self, key: &str) -> Result<Vec<HistoryEntry>> {
        let Some(value) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_value(value).with_context(|| format!("malformed {key} list in store"))
    }

    fn write_list(&self, key: &str, entries: &[HistoryEntry]) -> Result<()> {
        let value = serde_json::to_value(entries)?;
        self.store.set(key, &value)
    }
}

/// Newest first, long texts shortened, same as the page the tool grew out of.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "history is empty".to_string();
    }
    entries
        .iter()
        .rev()
        .map(|entry| {
            format!(
                "{}  {}→{}  {} → {}",
                format_when(entry.when),
                entry.source_lang,
                entry.target_lang,
                truncate_text(&entry.source_text, 80),
                truncate_text(&entry.translated_text, 80),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stored order with 1-based positions, so `--remove-favorite N` lines up
/// with what the listing shows.
pub fn render_favorites(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "no favorites saved".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{}. {}→{}  {} → {}",
                index + 1,
                entry.source_lang,
                entry.target_lang,
                truncate_text(&entry.source_text, 60),
                truncate_text(&entry.translated_text, 60),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_len).collect();
    shortened.push('…');
    shortened
}

fn format_when(millis: i64) -> String {
    let Ok(datetime) = OffsetDateTime::from_unix_timestamp(millis / 1000) else {
        return "????-??-?? ??:??".to_string();
    };
    let Ok(format) = format_description::parse("[year]-[month]-[day] [hour]:[minute]") else {
        return "????-??-?? ??:??".to_string();
    };
    datetime
        .format(&format)
        .unwrap_or_else(|_| "????-??-?? ??:??".to_string())
}
