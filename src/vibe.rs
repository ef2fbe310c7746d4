//! Vibe check: an AI review of commit hygiene and test coverage
//!
//! There is no heuristic version; without an API key this fails.

use tracing::{debug, warn};

use crate::ai::prompts::{self, SYSTEM_PROMPT, VIBE_MAX_TOKENS, VIBE_TEMPERATURE};
use crate::ai::provider::{CompletionProvider, CompletionRequest, TokenUsage};
use crate::core::context::BranchContext;
use crate::error::{PolishError, Result};

/// Shown when the model's answer had no usable bullets
pub const EMPTY_RESPONSE_NOTICE: &str =
    "The model returned no review bullets, so there is nothing to report.";

/// Review result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VibeReport {
    pub warnings: Vec<String>,
    /// Set when the response was empty or malformed
    pub notice: Option<String>,
    pub usage: TokenUsage,
}

/// Runs vibe checks against a completion provider
pub struct VibeChecker<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> VibeChecker<'a> {
    /// Fails with [`PolishError::MissingApiKey`] when there is no provider
    pub fn new(provider: Option<&'a dyn CompletionProvider>) -> Result<Self> {
        provider
            .map(|provider| Self { provider })
            .ok_or(PolishError::MissingApiKey)
    }

    /// Review the branch
    ///
    /// Transport, auth and rate-limit failures are returned as errors. An
    /// empty or unparseable answer yields an empty report with a notice.
    pub async fn check(&self, ctx: &BranchContext) -> Result<VibeReport> {
        let result = self
            .provider
            .complete(CompletionRequest {
                system: SYSTEM_PROMPT.to_string(),
                prompt: prompts::vibe_check_prompt(ctx),
                max_tokens: VIBE_MAX_TOKENS,
                temperature: VIBE_TEMPERATURE,
            })
            .await;

        let completion = match result {
            Ok(completion) => completion,
            Err(PolishError::MalformedResponse(detail)) => {
                warn!(%detail, "vibe check response was unusable");
                return Ok(VibeReport {
                    notice: Some(EMPTY_RESPONSE_NOTICE.to_string()),
                    ..VibeReport::default()
                });
            }
            Err(e) => return Err(e),
        };

        let warnings = parse_vibe_response(&completion.text);
        debug!(warnings = warnings.len(), "vibe check finished");

        let notice = warnings
            .is_empty()
            .then(|| EMPTY_RESPONSE_NOTICE.to_string());

        Ok(VibeReport {
            warnings,
            notice,
            usage: completion.usage,
        })
    }
}

/// Markdown bullet lines (`-` or `*`) of a response
pub fn parse_vibe_response(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")))
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
