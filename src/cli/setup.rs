//! GitHub CLI setup command handler

use crate::cli::prompt::Prompter;
use crate::core::config::Settings;
use crate::error::{PolishError, Result};
use crate::github::cli::INSTALL_URL;
use crate::github::PrCli;

/// Handle `setup-gh`
pub fn handle_setup_gh() -> Result<()> {
    let settings = Settings::load()?;
    let cli = PrCli::new(&settings.config.pr_cli);

    if !cli.is_installed() {
        println!("`{}` is not installed.", cli.program());
        println!();
        println!("Install it from {}", INSTALL_URL);
        println!("  macOS:          brew install gh");
        println!("  Debian/Ubuntu:  sudo apt install gh");
        println!("  Windows:        winget install --id GitHub.cli");
        return Err(PolishError::Config(format!(
            "`{}` is required to open pull requests",
            cli.program()
        )));
    }
    println!("✓ `{}` is installed.", cli.program());

    if cli.is_authenticated() {
        println!("✓ Already authenticated with GitHub.");
        return Ok(());
    }

    println!("`{}` is not authenticated.", cli.program());
    let prompter = Prompter::detect();
    if !prompter.is_interactive() || !prompter.confirm("Run the login flow now?", true)? {
        println!();
        println!("You can authenticate later with: {} auth login", cli.program());
        return Ok(());
    }

    cli.login()?;
    println!("\n✓ Successfully authenticated with GitHub!");
    Ok(())
}
