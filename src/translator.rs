use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::providers::{
    ProviderFailure, TranslateProvider, TranslationRequest, race_with_deadline,
};

/// The failures a caller ever sees. Per-provider causes are recovered by
/// falling through to the next candidate; only these are reportable.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("nothing to translate")]
    EmptyInput,
    #[error("no translation endpoints are configured")]
    NoProviders,
    #[error("every translation service failed: {cause}")]
    Exhausted { cause: ProviderFailure },
}

/// Sequential fallback over a prioritized list of primary endpoints, then a
/// single shot at the secondary endpoint. Each provider is attempted exactly
/// once per call; there is no retry and no backoff. Persistence of the result
/// is the caller's business, which keeps this testable with fake providers.
pub struct Translator<P: TranslateProvider> {
    primaries: Vec<P>,
    secondary: Option<P>,
    timeout: Duration,
}

impl<P: TranslateProvider> Translator<P> {
    pub fn new(primaries: Vec<P>, secondary: Option<P>, timeout: Duration) -> Self {
        Self {
            primaries,
            secondary,
            timeout,
        }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(TranslateError::EmptyInput);
        }
        if self.primaries.is_empty() && self.secondary.is_none() {
            return Err(TranslateError::NoProviders);
        }
        let request = TranslationRequest {
            text: text.to_string(),
            source_lang: request.source_lang.clone(),
            target_lang: request.target_lang.clone(),
        };

        let mut last_failure = None;
        for provider in &self.primaries {
            match self.attempt(provider, &request).await {
                Ok(translated) => return Ok(translated),
                Err(failure) => {
                    warn!("{failure}; trying next endpoint");
                    last_failure = Some(failure);
                }
            }
        }

        if let Some(secondary) = &self.secondary {
            match self.attempt(secondary, &request).await {
                Ok(translated) => return Ok(translated),
                Err(failure) => {
                    warn!("{failure}");
                    last_failure = Some(failure);
                }
            }
        }

        // At least one provider ran, so a cause was recorded.
        match last_failure {
            Some(cause) => Err(TranslateError::Exhausted { cause }),
            None => Err(TranslateError::NoProviders),
        }
    }

    async fn attempt(
        &self,
        provider: &P,
        request: &TranslationRequest,
    ) -> Result<String, ProviderFailure> {
        debug!("trying {}", provider.name());
        let call = provider.translate(request.clone());
        match race_with_deadline(call, self.timeout).await {
            Some(outcome) => outcome,
            None => Err(ProviderFailure::Timeout {
                endpoint: provider.name(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::TranslateFuture;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    enum Script {
        Reply(&'static str),
        Status(u16),
        Empty,
        Stall,
    }

    #[derive(Clone)]
    struct Scripted {
        label: &'static str,
        script: Script,
        calls: Arc<AtomicUsize>,
        seen: Arc<std::sync::Mutex<Vec<TranslationRequest>>>,
    }

    impl Scripted {
        fn new(label: &'static str, script: Script) -> Self {
            Self {
                label,
                script,
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Arc::new(std::sync::Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TranslateProvider for Scripted {
        fn name(&self) -> String {
            self.label.to_string()
        }

        fn translate(&self, request: TranslationRequest) -> TranslateFuture {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request);
            let script = self.script.clone();
            let endpoint = self.label.to_string();
            Box::pin(async move {
                match script {
                    Script::Reply(text) => Ok(text.to_string()),
                    Script::Status(status) => {
                        Err(ProviderFailure::Status { endpoint, status })
                    }
                    Script::Empty => Err(ProviderFailure::EmptyPayload { endpoint }),
                    Script::Stall => std::future::pending().await,
                }
            })
        }
    }

    fn request(text: &str) -> TranslationRequest {
        TranslationRequest {
            text: text.to_string(),
            source_lang: "en".to_string(),
            target_lang: "bn".to_string(),
        }
    }

    fn translator(primaries: Vec<Scripted>, secondary: Option<Scripted>) -> Translator<Scripted> {
        Translator::new(primaries, secondary, Duration::from_millis(40))
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let first = Scripted::new("a", Script::Reply("হ্যালো"));
        let second = Scripted::new("b", Script::Reply("unused"));
        let fallback = Scripted::new("f", Script::Reply("unused"));
        let translator = translator(
            vec![first.clone(), second.clone()],
            Some(fallback.clone()),
        );

        let result = translator.translate(&request("hello")).await.unwrap();
        assert_eq!(result, "হ্যালো");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn failure_advances_with_identical_parameters() {
        let first = Scripted::new("a", Script::Status(500));
        let second = Scripted::new("b", Script::Reply("হ্যালো"));
        let fallback = Scripted::new("f", Script::Reply("unused"));
        let translator = translator(
            vec![first.clone(), second.clone()],
            Some(fallback.clone()),
        );

        let result = translator.translate(&request("hello")).await.unwrap();
        assert_eq!(result, "হ্যালো");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
        assert_eq!(fallback.calls(), 0);

        let seen = second.seen.lock().unwrap();
        assert_eq!(seen[0].text, "hello");
        assert_eq!(seen[0].source_lang, "en");
        assert_eq!(seen[0].target_lang, "bn");
    }

    #[tokio::test]
    async fn stalled_provider_times_out_and_is_abandoned() {
        let first = Scripted::new("a", Script::Stall);
        let second = Scripted::new("b", Script::Reply("ok"));
        let translator = translator(vec![first.clone(), second.clone()], None);

        let result = translator.translate(&request("hello")).await.unwrap();
        assert_eq!(result, "ok");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn empty_payload_falls_through() {
        let first = Scripted::new("a", Script::Empty);
        let second = Scripted::new("b", Script::Reply("ok"));
        let translator = translator(vec![first.clone(), second.clone()], None);

        assert_eq!(translator.translate(&request("hi")).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn exhaustion_reports_the_most_recent_cause() {
        let first = Scripted::new("a", Script::Status(500));
        let fallback = Scripted::new("f", Script::Status(503));
        let translator = translator(vec![first], Some(fallback.clone()));

        let err = translator.translate(&request("hello")).await.unwrap_err();
        match err {
            TranslateError::Exhausted {
                cause: ProviderFailure::Status { endpoint, status },
            } => {
                assert_eq!(endpoint, "f");
                assert_eq!(status, 503);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn blank_input_makes_no_calls() {
        let first = Scripted::new("a", Script::Reply("unused"));
        let fallback = Scripted::new("f", Script::Reply("unused"));
        let translator = translator(vec![first.clone()], Some(fallback.clone()));

        for text in ["", "   ", "\n\t"] {
            let err = translator.translate(&request(text)).await.unwrap_err();
            assert!(matches!(err, TranslateError::EmptyInput));
        }
        assert_eq!(first.calls(), 0);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn no_configured_endpoints_is_its_own_error() {
        let translator: Translator<Scripted> = Translator::new(
            Vec::new(),
            None,
            Duration::from_millis(10),
        );
        let err = translator.translate(&request("hello")).await.unwrap_err();
        assert!(matches!(err, TranslateError::NoProviders));
    }
}
