use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use serde::Deserialize;

/// One dictionary entry as the free dictionary API family reports it.
#[derive(Debug, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub phonetic: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
pub struct Definition {
    pub definition: String,
    pub example: Option<String>,
}

pub async fn lookup(
    client: &reqwest::Client,
    endpoint: &str,
    word: &str,
) -> Result<Vec<DictionaryEntry>> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(anyhow!("nothing to look up"));
    }

    let url = format!("{}/{}", endpoint.trim_end_matches('/'), word);
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| "dictionary service is unreachable")?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(anyhow!("no definitions found for '{word}'"));
    }
    if !response.status().is_success() {
        return Err(anyhow!(
            "dictionary service returned HTTP {}",
            response.status()
        ));
    }

    let entries: Vec<DictionaryEntry> = response
        .json()
        .await
        .with_context(|| "failed to parse dictionary response")?;
    if entries.is_empty() {
        return Err(anyhow!("no definitions found for '{word}'"));
    }
    Ok(entries)
}

/// Plain-text report for the first entry: headword with phonetic, then each
/// part of speech with numbered definitions and example sentences.
pub fn render_entry(entry: &DictionaryEntry) -> String {
    let mut lines = Vec::new();
    match entry.phonetic.as_deref() {
        Some(phonetic) if !phonetic.trim().is_empty() => {
            lines.push(format!("{} {}", entry.word, phonetic));
        }
        _ => lines.push(entry.word.clone()),
    }

    for meaning in &entry.meanings {
        lines.push(String::new());
        lines.push(meaning.part_of_speech.clone());
        for (index, definition) in meaning.definitions.iter().enumerate() {
            lines.push(format!("  {}. {}", index + 1, definition.definition));
            if let Some(example) = definition.example.as_deref() {
                if !example.trim().is_empty() {
                    lines.push(format!("     e.g. {example}"));
                }
            }
        }
    }

    lines.join("\n")
}
