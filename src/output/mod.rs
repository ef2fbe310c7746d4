//! Presenting and delivering generated content
//!
//! - Terminal output
//! - Draft files
//! - Clipboard
//! - Opening the pull request

pub mod clipboard;
pub mod drafts;
pub mod publish;

pub use clipboard::copy_to_clipboard;
pub use drafts::{save_drafts, DESCRIPTION_DRAFT_FILE, TITLE_DRAFT_FILE};
pub use publish::Publisher;

use crate::content::GeneratedContent;
use crate::vibe::VibeReport;

/// Print a non-fatal problem on stderr
pub fn print_warning(message: &str) {
    eprintln!("Warning: {}", message);
}

pub fn print_title(title: &str) {
    println!("\nPR Title:\n  {}\n", title);
}

pub fn print_description(description: &str) {
    println!("PR Description:");
    println!("─────────────────────────────────────────");
    println!("{}", description);
    println!("─────────────────────────────────────────\n");
}

/// Title and description, for opening the PR by hand
pub fn print_manual_instructions(content: &GeneratedContent) {
    eprintln!("\nCreate the pull request manually with:");
    eprintln!("\nTitle:\n{}", content.title);
    eprintln!("\nDescription:\n{}\n", content.description);
}

pub fn print_cost(cost_usd: f64) {
    if cost_usd > 0.0 {
        println!("Estimated API cost: ${:.4}", cost_usd);
    }
}

pub fn print_vibe_report(report: &VibeReport) {
    println!("\nVibe check:");
    for warning in &report.warnings {
        println!("  • {}", warning);
    }
    if let Some(notice) = &report.notice {
        println!("  {}", notice);
    }
    print_cost(report.usage.estimated_cost_usd());
}
