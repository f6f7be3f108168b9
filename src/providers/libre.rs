use serde::Deserialize;
use serde_json::json;

use super::{ProviderFailure, TranslateFuture, TranslateProvider, TranslationRequest};

/// One LibreTranslate-style endpoint. The orchestrator holds one of these per
/// configured primary URL, in priority order.
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    client: reqwest::Client,
    endpoint: String,
}

impl LibreTranslate {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

impl TranslateProvider for LibreTranslate {
    fn name(&self) -> String {
        self.endpoint.clone()
    }

    fn translate(&self, request: TranslationRequest) -> TranslateFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let body = json!({
                "q": request.text,
                "source": request.source_lang,
                "target": request.target_lang,
                "format": "text"
            });

            let response = client
                .post(&endpoint)
                .json(&body)
                .send()
                .await
                .map_err(|err| ProviderFailure::Transport {
                    endpoint: endpoint.clone(),
                    reason: err.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(ProviderFailure::Status {
                    endpoint,
                    status: status.as_u16(),
                });
            }

            let payload: LibreResponse =
                response
                    .json()
                    .await
                    .map_err(|_| ProviderFailure::EmptyPayload {
                        endpoint: endpoint.clone(),
                    })?;

            extract_translation(payload).ok_or(ProviderFailure::EmptyPayload { endpoint })
        })
    }
}

/// Endpoints of this family disagree on the field name for the output
/// string; accept any of the known synonyms.
#[derive(Debug, Default, Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    result: Option<String>,
    translated: Option<String>,
}

fn extract_translation(payload: LibreResponse) -> Option<String> {
    [payload.translated_text, payload.result, payload.translated]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
}
