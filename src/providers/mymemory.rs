use serde::Deserialize;

use super::{ProviderFailure, TranslateFuture, TranslateProvider, TranslationRequest};

/// The MyMemory-style fallback endpoint: GET with a combined
/// `source|target` language pair, tried only after every primary failed.
#[derive(Debug, Clone)]
pub struct MyMemory {
    client: reqwest::Client,
    endpoint: String,
}

impl MyMemory {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

impl TranslateProvider for MyMemory {
    fn name(&self) -> String {
        self.endpoint.clone()
    }

    fn translate(&self, request: TranslationRequest) -> TranslateFuture {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        Box::pin(async move {
            let langpair = langpair(&request);
            let response = client
                .get(&endpoint)
                .query(&[("q", request.text.as_str()), ("langpair", langpair.as_str())])
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

            let payload: MyMemoryResponse =
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

fn langpair(request: &TranslationRequest) -> String {
    format!("{}|{}", request.source_lang, request.target_lang)
}

#[derive(Debug, Default, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<MyMemoryData>,
}

#[derive(Debug, Default, Deserialize)]
struct MyMemoryData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

fn extract_translation(payload: MyMemoryResponse) -> Option<String> {
    payload
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
}
