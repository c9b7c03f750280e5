use anyhow::Result;
use serde::Deserialize;
use std::env;

/// Default body limit for uploads (25 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub groq_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub validate_output: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
            validate_output: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = AnalysisConfig::default();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                    .parse()?,
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "groq".to_string()),
                groq_api_key: non_blank(env::var("GROQ_API_KEY").ok()),
                openai_api_key: non_blank(env::var("OPENAI_API_KEY").ok()),
                api_base: non_blank(env::var("LLM_API_BASE").ok()),
            },
            analysis: AnalysisConfig {
                model: env::var("ANALYSIS_MODEL").unwrap_or(defaults.model),
                temperature: env::var("ANALYSIS_TEMPERATURE")
                    .unwrap_or_else(|_| defaults.temperature.to_string())
                    .parse()?,
                max_tokens: env::var("ANALYSIS_MAX_TOKENS")
                    .unwrap_or_else(|_| defaults.max_tokens.to_string())
                    .parse()?,
                validate_output: env::var("VALIDATE_ANALYSIS")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()?,
            },
        })
    }
}

impl LLMConfig {
    /// The credential for the configured provider, if any
    ///
    /// Each provider only ever sees its own key; an unknown provider has none.
    pub fn active_api_key(&self) -> Option<&str> {
        match self.provider.as_str() {
            "groq" => self.groq_api_key.as_deref(),
            "openai" => self.openai_api_key.as_deref(),
            _ => None,
        }
    }

    /// Environment variable holding the configured provider's credential
    pub fn credential_var(&self) -> &'static str {
        match self.provider.as_str() {
            "openai" => "OPENAI_API_KEY",
            _ => "GROQ_API_KEY",
        }
    }
}

// Treat `GROQ_API_KEY=` the same as an unset variable
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
