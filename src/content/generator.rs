//! AI generation with heuristic fallback

use tracing::{debug, warn};

use crate::ai::prompts::{
    self, COMBINED_MAX_TOKENS, DESCRIPTION_MAX_TOKENS, GENERATION_TEMPERATURE, SYSTEM_PROMPT,
    TITLE_MAX_TOKENS,
};
use crate::ai::provider::{CompletionProvider, CompletionRequest, TokenUsage};
use crate::ai::response::{clean_title, parse_pr_content};
use crate::content::heuristic::{
    heuristic_description, heuristic_title, truncate_chars, MAX_TITLE_CHARS,
};
use crate::content::markdown::{has_required_sections, strip_code_fences};
use crate::content::{ContentSource, GeneratedContent, Parts};
use crate::core::context::BranchContext;
use crate::core::template::Template;
use crate::error::{PolishError, Result};

/// What to generate and with which templates
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub parts: Parts,
    pub description_template: Template,
    pub title_template: Option<Template>,
}

/// Produces PR content, preferring the model when one is available
pub struct ContentGenerator<'a> {
    provider: Option<&'a dyn CompletionProvider>,
}

impl<'a> ContentGenerator<'a> {
    pub fn new(provider: Option<&'a dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate content; model failures degrade to heuristics with a warning
    pub async fn generate(
        &self,
        ctx: &BranchContext,
        request: &GenerationRequest,
    ) -> GeneratedContent {
        let Some(provider) = self.provider else {
            debug!("no API key, using heuristic generation");
            return heuristic_content(ctx, request);
        };

        let completion = match provider.complete(completion_request(ctx, request)).await {
            Ok(completion) => completion,
            Err(e) => return fallback(ctx, request, &e, TokenUsage::default()),
        };

        match parse_completion(&completion.text, request) {
            Ok((title, description)) => GeneratedContent {
                parts: request.parts,
                title,
                description,
                source: ContentSource::Ai,
                warnings: Vec::new(),
                cost_usd: completion.usage.estimated_cost_usd(),
            },
            Err(e) => fallback(ctx, request, &e, completion.usage),
        }
    }
}

/// Heuristic content for the requested parts
pub fn heuristic_content(ctx: &BranchContext, request: &GenerationRequest) -> GeneratedContent {
    let title = if request.parts.includes_title() {
        heuristic_title(ctx, request.title_template.as_ref())
    } else {
        String::new()
    };
    let description = if request.parts.includes_description() {
        heuristic_description(ctx, &request.description_template)
    } else {
        String::new()
    };

    GeneratedContent {
        parts: request.parts,
        title,
        description,
        source: ContentSource::Heuristic,
        warnings: Vec::new(),
        cost_usd: 0.0,
    }
}

/// Fill whichever half was not generated, so a PR can be opened
pub fn fill_missing_parts(
    content: &mut GeneratedContent,
    ctx: &BranchContext,
    description_template: &Template,
) {
    if !content.parts.includes_title() {
        content.title = heuristic_title(ctx, None);
    }
    if !content.parts.includes_description() {
        content.description = heuristic_description(ctx, description_template);
    }
    content.parts = Parts::Both;
}

fn fallback(
    ctx: &BranchContext,
    request: &GenerationRequest,
    error: &PolishError,
    usage: TokenUsage,
) -> GeneratedContent {
    warn!(error = %error, "AI generation failed, falling back to heuristics");
    let mut content = heuristic_content(ctx, request);
    content.warnings.push(format!(
        "AI generation failed, using heuristic output instead: {}",
        error_detail(error)
    ));
    content.cost_usd = usage.estimated_cost_usd();
    content
}

/// One-line description of a failure for warnings
fn error_detail(error: &PolishError) -> String {
    match error {
        PolishError::Api(msg) | PolishError::MalformedResponse(msg) => msg.clone(),
        other => other
            .to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn completion_request(ctx: &BranchContext, request: &GenerationRequest) -> CompletionRequest {
    let (prompt, max_tokens) = match request.parts {
        Parts::Both => (
            prompts::pr_content_prompt(ctx, &request.description_template),
            COMBINED_MAX_TOKENS,
        ),
        Parts::Title => (
            prompts::title_prompt(ctx, request.title_template.as_ref()),
            TITLE_MAX_TOKENS,
        ),
        Parts::Description => (
            prompts::description_prompt(ctx, &request.description_template),
            DESCRIPTION_MAX_TOKENS,
        ),
    };

    CompletionRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt,
        max_tokens,
        temperature: GENERATION_TEMPERATURE,
    }
}

/// Turn model output into (title, description), rejecting unusable output
fn parse_completion(text: &str, request: &GenerationRequest) -> Result<(String, String)> {
    match request.parts {
        Parts::Both => {
            let content = parse_pr_content(text)?;
            let title = validate_title(&content.title)?;
            let description = validate_description(&content.body, &request.description_template)?;
            Ok((title, description))
        }
        Parts::Title => Ok((validate_title(text)?, String::new())),
        Parts::Description => Ok((
            String::new(),
            validate_description(text, &request.description_template)?,
        )),
    }
}

fn validate_title(raw: &str) -> Result<String> {
    clean_title(raw)
        .map(|t| truncate_chars(&t, MAX_TITLE_CHARS))
        .ok_or_else(|| PolishError::Api("the model returned an empty title".to_string()))
}

fn validate_description(raw: &str, template: &Template) -> Result<String> {
    let description = strip_code_fences(raw);
    if description.is_empty() {
        return Err(PolishError::Api(
            "the model returned an empty description".to_string(),
        ));
    }
    if template.is_default() && !has_required_sections(&description) {
        return Err(PolishError::Api(
            "the description is missing required sections".to_string(),
        ));
    }
    Ok(description)
}
