// OpenAI-compatible chat completion adapter
// Groq exposes the same wire format, see groq.rs

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMMessage, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    api_base: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [LLMMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

impl OpenAIAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::new_with_api_base(api_key, OPENAI_API_BASE)
    }

    pub fn new_with_api_base(api_key: &str, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = format!("{}/chat/completions", self.api_base);

        let body = ChatRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("Completion request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                return Err(AppError::LLMApi(format!(
                    "Completion API error ({}): {} (type: {:?})",
                    status, error_response.error.message, error_response.error.error_type
                )));
            }

            return Err(AppError::LLMApi(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to parse completion response: {}", e)))?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMApi("Completion returned no choices".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| AppError::LLMApi("Completion returned no content".to_string()))?;

        let usage = chat_response
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(LLMResponse {
            content,
            finish_reason: choice.finish_reason.unwrap_or_default(),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request() -> LLMRequest {
        LLMRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            messages: vec![LLMMessage::user("Analyze this")],
            max_tokens: Some(2000),
            temperature: Some(0.1),
        }
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let adapter = OpenAIAdapter::new_with_api_base("key", "http://localhost:1234/v1/");
        assert_eq!(adapter.api_base(), "http://localhost:1234/v1");
        assert_eq!(OpenAIAdapter::new("key").api_base(), OPENAI_API_BASE);
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama-3.3-70b-versatile",
                "max_tokens": 2000,
                "stream": false,
                "messages": [{ "role": "user", "content": "Analyze this" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "id": "chatcmpl-1",
                    "choices": [{
                        "index": 0,
                        "message": { "role": "assistant", "content": "{\"management_tone\":\"Confident\"}" },
                        "finish_reason": "stop"
                    }],
                    "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new_with_api_base("test-key", &server.url());
        let response = adapter.create_chat_completion(&request()).await.unwrap();

        assert_eq!(response.content, "{\"management_tone\":\"Confident\"}");
        assert_eq!(response.finish_reason, "stop");
        assert_eq!(response.usage.total_tokens, 15);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_llm_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#)
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new_with_api_base("bad-key", &server.url());
        match adapter.create_chat_completion(&request()).await {
            Err(AppError::LLMApi(msg)) => assert!(msg.contains("Invalid API Key")),
            other => panic!("expected LLM API error, got {:?}", other.map(|r| r.content)),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_llm_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let adapter = OpenAIAdapter::new_with_api_base("test-key", &server.url());
        assert!(matches!(
            adapter.create_chat_completion(&request()).await,
            Err(AppError::LLMApi(_))
        ));
    }
}
