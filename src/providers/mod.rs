use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

mod deadline;
mod libre;
mod mymemory;

pub use deadline::race_with_deadline;
pub use libre::LibreTranslate;
pub use mymemory::MyMemory;

/// A single translation attempt. Text is trimmed and non-empty, language
/// tags are concrete codes; the caller resolves `auto` before building one.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

/// Why one provider attempt produced no translation. Never surfaced on its
/// own; the orchestrator keeps the most recent cause for the exhaustion
/// report.
#[derive(Debug, Clone, Error)]
pub enum ProviderFailure {
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
    #[error("{endpoint} did not answer within {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("{endpoint} returned no usable translation")]
    EmptyPayload { endpoint: String },
}

pub type TranslateFuture =
    Pin<Box<dyn Future<Output = Result<String, ProviderFailure>> + Send>>;

/// Seam between the orchestrator and a remote translation service. The
/// returned future owns everything it needs so the orchestrator can detach
/// from it when the deadline wins.
pub trait TranslateProvider: Send + Sync {
    /// Endpoint label used in logs and failure causes.
    fn name(&self) -> String;
    fn translate(&self, request: TranslationRequest) -> TranslateFuture;
}

#[derive(Debug, Clone)]
pub enum ProviderImpl {
    Libre(LibreTranslate),
    MyMemory(MyMemory),
}

impl TranslateProvider for ProviderImpl {
    fn name(&self) -> String {
        match self {
            ProviderImpl::Libre(provider) => provider.name(),
            ProviderImpl::MyMemory(provider) => provider.name(),
        }
    }

    fn translate(&self, request: TranslationRequest) -> TranslateFuture {
        match self {
            ProviderImpl::Libre(provider) => provider.translate(request),
            ProviderImpl::MyMemory(provider) => provider.translate(request),
        }
    }
}

/// Primary endpoints in priority order, from settings.
pub fn build_primaries(client: &reqwest::Client, endpoints: &[String]) -> Vec<ProviderImpl> {
    endpoints
        .iter()
        .map(|endpoint| ProviderImpl::Libre(LibreTranslate::new(client.clone(), endpoint.clone())))
        .collect()
}

pub fn build_secondary(client: &reqwest::Client, endpoint: &str) -> Option<ProviderImpl> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return None;
    }
    Some(ProviderImpl::MyMemory(MyMemory::new(
        client.clone(),
        endpoint.to_string(),
    )))
}
