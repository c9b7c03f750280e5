//! Document Analysis
//!
//! The single pipeline behind `POST /analyze`:
//!
//! ```text
//! UploadedDocument
//!      │
//!      ▼
//! ┌─────────────┐
//! │ Extraction  │  → PDF text layer or decoded text
//! └─────────────┘
//!      │ blank? ──────────────► fallback
//!      ▼
//! ┌─────────────┐
//! │   Prompt    │  → first 35,000 characters embedded
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │ Completion  │  → error / no client ─► fallback
//! └─────────────┘
//!      │
//!      ▼
//!  fence cleanup → AnalysisResponse
//! ```
//!
//! Callers always get an `AnalysisResponse`; every failure after the
//! upload has been read degrades to the fixed fallback analysis.

pub mod cleanup;
pub mod prompt;
pub mod schema;

pub use cleanup::clean_completion;
pub use prompt::{build_prompt, MAX_PROMPT_CHARS};
pub use schema::{fallback_json, FinancialAnalysis, FALLBACK_ANALYSIS_JSON};

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::{AnalysisConfig, Config};
use crate::extraction::extract_text;
use crate::llm::provider::{LLMAdapter, LLMProviderConfig, LLM};
use crate::models::{AnalysisResponse, UploadedDocument};
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest};

/// Where the `analysis` string of a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Model,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    EmptyText,
    CompletionFailed,
    InvalidOutput,
}

pub struct DocumentAnalyzer {
    completion: Option<Arc<dyn LLMAdapter>>,
    config: AnalysisConfig,
}

impl DocumentAnalyzer {
    pub fn new(completion: Option<Arc<dyn LLMAdapter>>, config: AnalysisConfig) -> Self {
        Self { completion, config }
    }

    /// Build the analyzer from process configuration
    ///
    /// Without a credential, or when the client cannot be constructed, the
    /// analyzer runs without a completion client and serves the fallback.
    pub fn from_config(config: &Config) -> Self {
        let completion: Option<Arc<dyn LLMAdapter>> = match config.llm.active_api_key() {
            Some(api_key) => {
                let provider = LLMProviderConfig {
                    name: config.llm.provider.clone(),
                    api_key: api_key.to_string(),
                    api_base: config.llm.api_base.clone(),
                };
                match LLM::new(provider) {
                    Ok(llm) => {
                        info!(provider = %llm.provider_name(), model = %config.analysis.model, "Completion client initialized");
                        Some(Arc::new(llm))
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to initialize completion client");
                        None
                    }
                }
            }
            None => {
                warn!(
                    provider = %config.llm.provider,
                    "No {} configured, every analysis will use the fallback",
                    config.llm.credential_var()
                );
                None
            }
        };

        Self::new(completion, config.analysis.clone())
    }

    pub async fn analyze(&self, document: UploadedDocument) -> AnalysisResponse {
        let filename = document.filename.clone();
        let (analysis, source) = self.run(document).await;

        info!(filename = %filename, source = ?source, "Analysis complete");

        AnalysisResponse { filename, analysis }
    }

    pub(crate) async fn run(&self, document: UploadedDocument) -> (String, AnalysisSource) {
        info!(filename = %document.filename, bytes = document.bytes.len(), "Received document");

        // lopdf parsing is CPU bound
        let text = match tokio::task::spawn_blocking(move || extract_text(&document)).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Extraction task failed");
                String::new()
            }
        };

        if text.trim().is_empty() {
            warn!("Empty text detected, using fallback analysis");
            return (fallback_json(), AnalysisSource::Fallback(FallbackReason::EmptyText));
        }

        info!(chars = text.chars().count(), "Text extracted");

        let prompt = build_prompt(&text);
        let raw = match self.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Completion failed, using fallback analysis");
                return (
                    fallback_json(),
                    AnalysisSource::Fallback(FallbackReason::CompletionFailed),
                );
            }
        };

        let cleaned = clean_completion(&raw);

        if self.config.validate_output {
            if let Err(e) = FinancialAnalysis::parse(&cleaned) {
                warn!(error = %e, "Model output failed validation, using fallback analysis");
                return (
                    fallback_json(),
                    AnalysisSource::Fallback(FallbackReason::InvalidOutput),
                );
            }
        }

        (cleaned, AnalysisSource::Model)
    }

    /// Send a prompt to the completion service and return the raw reply
    pub async fn complete(&self, prompt: &str) -> AppResult<String> {
        let completion = self
            .completion
            .as_ref()
            .ok_or_else(|| AppError::Configuration("No API key configured".to_string()))?;

        let request = LLMRequest {
            model: self.config.model.clone(),
            messages: vec![LLMMessage::user(prompt)],
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        };

        info!(model = %request.model, prompt_chars = prompt.chars().count(), "Sending completion request");
        let response = completion.create_chat_completion(&request).await?;
        info!(
            finish_reason = %response.finish_reason,
            total_tokens = response.usage.total_tokens,
            "Completion received"
        );

        Ok(response.content)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::llm::provider::LLMAdapter;
    use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Completion double that records every request
    pub(crate) struct FakeCompletion {
        reply: Result<String, String>,
        calls: AtomicUsize,
        requests: Mutex<Vec<LLMRequest>>,
    }

    impl FakeCompletion {
        pub(crate) fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub(crate) fn requests(&self) -> Vec<LLMRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn last_prompt(&self) -> String {
            let requests = self.requests.lock().unwrap();
            requests.last().unwrap().messages[0].content.clone()
        }
    }

    #[async_trait]
    impl LLMAdapter for FakeCompletion {
        async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(content) => Ok(LLMResponse {
                    content: content.clone(),
                    finish_reason: "stop".to_string(),
                    usage: TokenUsage::default(),
                }),
                Err(message) => Err(AppError::LLMApi(message.clone())),
            }
        }
    }
}
