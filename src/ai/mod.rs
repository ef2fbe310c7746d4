//! AI integration module
//!
//! OpenAI chat-completions integration for generating:
//! - PR titles and descriptions
//! - Vibe check reviews

pub mod diff;
pub mod error_handler;
pub mod openai;
pub mod prompts;
pub mod provider;
pub mod response;

pub use openai::OpenAiClient;
pub use provider::{Completion, CompletionProvider, CompletionRequest, TokenUsage};
