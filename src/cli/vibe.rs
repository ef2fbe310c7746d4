//! Vibe check command handler

use crate::ai::{CompletionProvider, OpenAiClient};
use crate::core::config::Settings;
use crate::core::context::BranchInspector;
use crate::error::Result;
use crate::output;
use crate::vibe::VibeChecker;

/// Handle `vibe-check`
///
/// Unlike the check offered inside `generate`, failures here are errors.
pub async fn handle_vibe_check() -> Result<()> {
    let settings = Settings::load()?;
    let client = OpenAiClient::from_settings(&settings)?;
    let checker = VibeChecker::new(client.as_ref().map(|c| c as &dyn CompletionProvider))?;

    let ctx = BranchInspector::open_current_dir(&settings.config.remote)?.inspect()?;
    if ctx.is_empty() {
        println!("No changes detected on this branch.");
        return Ok(());
    }

    println!("Reviewing {} commit(s) on '{}'...", ctx.commits.len(), ctx.branch);
    let report = checker.check(&ctx).await?;
    output::print_vibe_report(&report);
    Ok(())
}
