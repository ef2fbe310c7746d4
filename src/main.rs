//! prpolish - polished pull request titles and descriptions
//!
//! Generates PR content from the current branch, with OpenAI when a key is
//! configured and commit/file heuristics otherwise.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use prpolish::cli::commands::{Cli, Commands};
use prpolish::cli::{config, generate, setup, vibe};
use prpolish::core::git::GitRepository;
use prpolish::error::{PolishError, Result};

#[tokio::main]
async fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Neither needs a git repository
        Commands::Config(args) => config::handle_config(args.command),
        Commands::SetupGh => setup::handle_setup_gh(),

        command => {
            ensure_git_repository()?;

            match command {
                Commands::Generate(args) => generate::handle_generate(args).await,
                Commands::GenerateTitle(args) => generate::handle_generate_title(args).await,
                Commands::GenerateDesc(args) => generate::handle_generate_desc(args).await,
                Commands::VibeCheck => vibe::handle_vibe_check().await,
                Commands::Config(_) | Commands::SetupGh => unreachable!(),
            }
        }
    }
}

/// Ensure we're in a git repository
fn ensure_git_repository() -> Result<()> {
    if !GitRepository::is_git_repository() {
        return Err(PolishError::NotGitRepository);
    }
    Ok(())
}
