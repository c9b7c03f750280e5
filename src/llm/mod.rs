// LLM abstraction layer

pub mod provider;
pub mod openai;
pub mod groq;

pub use provider::*;
pub use crate::types::{LLMMessage, LLMRequest, LLMResponse, TokenUsage};
