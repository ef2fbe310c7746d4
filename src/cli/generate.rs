//! Generate command handlers

use std::env;

use tracing::debug;

use crate::ai::{CompletionProvider, OpenAiClient};
use crate::cli::commands::{GenerateArgs, GenerateDescArgs, GenerateTitleArgs, SharedArgs};
use crate::cli::prompt::Prompter;
use crate::content::generator::fill_missing_parts;
use crate::content::markdown::{remove_placeholder_related_section, replace_related_section};
use crate::content::resources::format_related_resources;
use crate::content::{ContentGenerator, GeneratedContent, GenerationRequest, Parts};
use crate::core::config::Settings;
use crate::core::context::{BranchContext, BranchInspector};
use crate::core::template::{resolve_description_template, resolve_title_template};
use crate::error::{PolishError, Result};
use crate::github::PrCli;
use crate::output::{self, Publisher};
use crate::vibe::VibeChecker;

/// Handle `generate`
pub async fn handle_generate(args: GenerateArgs) -> Result<()> {
    run(Parts::Both, args.shared, args.save.map(Parts::from)).await
}

/// Handle `generate-title`
pub async fn handle_generate_title(args: GenerateTitleArgs) -> Result<()> {
    run(Parts::Title, args.shared, args.save.map(Parts::from)).await
}

/// Handle `generate-desc`
pub async fn handle_generate_desc(args: GenerateDescArgs) -> Result<()> {
    run(Parts::Description, args.shared, args.save.map(Parts::from)).await
}

/// A `--save` target must be something the command generates
fn validate_save_target(parts: Parts, save: Option<Parts>) -> Result<()> {
    match save {
        Some(target) if !parts.covers(target) => Err(PolishError::InvalidInput(format!(
            "--save {} is not available here; this command only generates the {}.",
            target.name(),
            parts.name()
        ))),
        _ => Ok(()),
    }
}

/// Resolve templates up front so a bad `--template` fails before any work
fn resolve_request(
    parts: Parts,
    template: Option<&str>,
    inspector: &BranchInspector,
) -> Result<GenerationRequest> {
    let root = inspector.root_dir()?;
    let (description_template, title_template) = match parts {
        Parts::Title => (
            resolve_description_template(None, &root)?,
            resolve_title_template(template)?,
        ),
        Parts::Description | Parts::Both => (resolve_description_template(template, &root)?, None),
    };

    debug!(origin = ?description_template.origin, "resolved description template");

    Ok(GenerationRequest {
        parts,
        description_template,
        title_template,
    })
}

async fn run(parts: Parts, shared: SharedArgs, save: Option<Parts>) -> Result<()> {
    validate_save_target(parts, save)?;

    let settings = Settings::load()?;
    let inspector = BranchInspector::open_current_dir(&settings.config.remote)?;
    let request = resolve_request(parts, shared.template.as_deref(), &inspector)?;

    let ctx = inspector.inspect()?;
    if ctx.is_empty() {
        println!("No changes detected on this branch.");
        return Ok(());
    }

    let client = OpenAiClient::from_settings(&settings)?;
    match &client {
        Some(client) => println!("Generating with {}...", client.model_name()),
        None => println!("OPENAI_API_KEY is not set; using heuristic generation."),
    }
    let provider = client.as_ref().map(|c| c as &dyn CompletionProvider);

    let mut content = ContentGenerator::new(provider).generate(&ctx, &request).await;
    for warning in &content.warnings {
        output::print_warning(warning);
    }

    let prompter = if shared.fast {
        Prompter::non_interactive()
    } else {
        Prompter::detect()
    };

    if shared.fast {
        fill_missing_parts(&mut content, &ctx, &request.description_template);
    }
    if content.parts.includes_description() {
        content.description = add_related_resources(&content.description, &prompter)?;
    }

    output::print_cost(content.cost_usd);

    let publisher = Publisher::new(
        inspector.git(),
        PrCli::new(&settings.config.pr_cli),
        &settings.config.remote,
    );

    if shared.fast {
        run_fast(&ctx, &content, save, &publisher)
    } else {
        run_interactive(&ctx, content, save, &prompter, provider, &publisher).await
    }
}

/// Ask for related resources and fold them into the description
fn add_related_resources(description: &str, prompter: &Prompter) -> Result<String> {
    if prompter.is_interactive()
        && prompter.confirm("Add related resources (tickets, docs, issues)?", false)?
    {
        let lines = prompter.read_lines("Enter one link or reference per line, empty line to finish:")?;
        if !lines.is_empty() {
            return Ok(replace_related_section(
                description,
                &format_related_resources(&lines),
            ));
        }
    }
    Ok(remove_placeholder_related_section(description))
}

fn save(content: &GeneratedContent, target: Parts) -> Result<()> {
    let dir = env::current_dir()?;
    for path in output::save_drafts(&dir, content, target)? {
        println!("✓ Saved {}", path.display());
    }
    Ok(())
}

/// No prompts: drafts, push, open PR
fn run_fast(
    ctx: &BranchContext,
    content: &GeneratedContent,
    save_target: Option<Parts>,
    publisher: &Publisher<'_>,
) -> Result<()> {
    output::print_title(&content.title);
    output::print_description(&content.description);

    if let Some(target) = save_target {
        save(content, target)?;
    }

    publisher.ensure_ready()?;
    let created = publisher.publish(ctx, content)?;
    println!("✓ Pull request created");
    if !created.is_empty() {
        println!("  {}", created);
    }
    Ok(())
}

/// Show, edit, save, copy, review, and optionally open the PR
async fn run_interactive(
    ctx: &BranchContext,
    mut content: GeneratedContent,
    save_target: Option<Parts>,
    prompter: &Prompter,
    provider: Option<&dyn CompletionProvider>,
    publisher: &Publisher<'_>,
) -> Result<()> {
    if content.parts.includes_title() {
        output::print_title(&content.title);
        if prompter.confirm("Edit the title?", false)? {
            let edited = prompter.edit(&content.title)?;
            if let Some(line) = edited.lines().map(str::trim).find(|l| !l.is_empty()) {
                content.title = line.to_string();
            }
        }
    }

    if content.parts.includes_description() {
        output::print_description(&content.description);
        if prompter.confirm("Edit the description?", false)? {
            let edited = prompter.edit(&content.description)?;
            if !edited.trim().is_empty() {
                content.description = edited.trim().to_string();
            }
        }
    }

    if let Some(target) = save_target {
        save(&content, target)?;
    }

    if prompter.is_interactive() && prompter.confirm("Copy to clipboard?", false)? {
        match output::copy_to_clipboard(&content.clipboard_text()) {
            Ok(()) => println!("✓ Copied to clipboard"),
            Err(e) => output::print_warning(&format!("could not copy to clipboard: {}", e)),
        }
    }

    if prompter.confirm("Run a vibe check?", false)? {
        run_vibe_check(ctx, provider).await;
    }

    if content.parts == Parts::Both && prompter.confirm("Create the pull request now?", false)? {
        publisher.ensure_ready()?;
        let created = publisher.publish(ctx, &content)?;
        println!("✓ Pull request created");
        if !created.is_empty() {
            println!("  {}", created);
        }
    }

    Ok(())
}

/// Vibe check inside `generate`: every failure is a warning
async fn run_vibe_check(ctx: &BranchContext, provider: Option<&dyn CompletionProvider>) {
    let checker = match VibeChecker::new(provider) {
        Ok(checker) => checker,
        Err(e) => {
            output::print_warning(&e.to_string());
            return;
        }
    };
    match checker.check(ctx).await {
        Ok(report) => output::print_vibe_report(&report),
        Err(e) => output::print_warning(&format!("vibe check failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_target_validation() {
        assert!(validate_save_target(Parts::Both, Some(Parts::Title)).is_ok());
        assert!(validate_save_target(Parts::Both, None).is_ok());
        assert!(validate_save_target(Parts::Title, Some(Parts::Title)).is_ok());

        let err = validate_save_target(Parts::Title, Some(Parts::Description)).unwrap_err();
        assert!(matches!(err, PolishError::InvalidInput(_)));
        assert!(validate_save_target(Parts::Description, Some(Parts::Both)).is_err());
    }

    #[test]
    fn test_related_resources_non_interactive() {
        let desc = format!(
            "# Summary\nx\n\n# Related Resources\n{}\n\n# Changes\n- a",
            crate::core::template::RELATED_PLACEHOLDER
        );
        let result = add_related_resources(&desc, &Prompter::non_interactive()).unwrap();
        assert_eq!(result, "# Summary\nx\n\n# Changes\n- a");
    }
}
