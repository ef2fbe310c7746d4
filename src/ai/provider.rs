//! Completion provider abstraction
//!
//! The generator and the vibe checker only need "prompt in, text out";
//! keeping that behind a trait lets tests swap in a mock.

use async_trait::async_trait;

use crate::error::Result;

/// gpt-3.5-turbo pricing, USD per 1K tokens
const PROMPT_COST_PER_1K: f64 = 0.0015;
const COMPLETION_COST_PER_1K: f64 = 0.002;

/// A single chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Token counts reported by the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Estimated cost of the request in USD
    pub fn estimated_cost_usd(&self) -> f64 {
        (self.prompt_tokens as f64 / 1000.0 * PROMPT_COST_PER_1K)
            + (self.completion_tokens as f64 / 1000.0 * COMPLETION_COST_PER_1K)
    }

    pub fn is_zero(&self) -> bool {
        self.prompt_tokens == 0 && self.completion_tokens == 0
    }
}

impl std::ops::Add for TokenUsage {
    type Output = TokenUsage;

    fn add(self, rhs: TokenUsage) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens + rhs.prompt_tokens,
            completion_tokens: self.completion_tokens + rhs.completion_tokens,
        }
    }
}

/// Model output plus usage
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// Something that can answer a chat completion request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;
}
