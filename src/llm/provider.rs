use async_trait::async_trait;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for an LLM provider
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    pub api_base: Option<String>,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let adapter: Box<dyn LLMAdapter> = match (provider.name.as_str(), provider.api_base.as_deref()) {
            ("groq", None) => Box::new(crate::llm::groq::GroqAdapter::new(&provider.api_key)),
            ("openai", None) => Box::new(crate::llm::openai::OpenAIAdapter::new(&provider.api_key)),
            // Any OpenAI-compatible endpoint can be targeted with an explicit base URL
            ("groq" | "openai", Some(base)) => Box::new(
                crate::llm::openai::OpenAIAdapter::new_with_api_base(&provider.api_key, base),
            ),
            (other, _) => {
                return Err(AppError::Configuration(format!("Unsupported provider: {}", other)))
            }
        };

        Ok(Self {
            adapter,
            provider_name: provider.name,
        })
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

#[async_trait]
impl LLMAdapter for LLM {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str, api_base: Option<&str>) -> LLMProviderConfig {
        LLMProviderConfig {
            name: name.to_string(),
            api_key: "test-key".to_string(),
            api_base: api_base.map(str::to_string),
        }
    }

    #[test]
    fn test_known_providers() {
        assert_eq!(LLM::new(provider("groq", None)).unwrap().provider_name(), "groq");
        assert_eq!(LLM::new(provider("openai", None)).unwrap().provider_name(), "openai");
        assert!(LLM::new(provider("groq", Some("http://localhost:9999/v1"))).is_ok());
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        match LLM::new(provider("carrier-pigeon", None)) {
            Err(AppError::Configuration(msg)) => assert!(msg.contains("carrier-pigeon")),
            _ => panic!("expected a configuration error"),
        }
    }
}
