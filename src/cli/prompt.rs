//! Terminal prompts and editor integration

use std::env;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::Command;

use crate::core::process::run_interactive;
use crate::error::{PolishError, Result};

const DEFAULT_EDITOR: &str = "vi";

/// Asks the user questions when attached to a terminal
///
/// When stdin is not a terminal every question is answered with its default.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    interactive: bool,
}

impl Prompter {
    /// Interactive when stdin is a terminal
    pub fn detect() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Yes/no question
    pub fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            return Ok(default);
        }

        let hint = if default { "[Y/n]" } else { "[y/N]" };
        print!("{} {} ", question, hint);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(parse_yes_no(&input, default))
    }

    /// Read lines until an empty one
    pub fn read_lines(&self, intro: &str) -> Result<Vec<String>> {
        if !self.interactive {
            return Ok(Vec::new());
        }

        println!("{}", intro);
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            lines.push(trimmed.to_string());
        }
        Ok(lines)
    }

    /// Open `text` in the user's editor and return the result
    pub fn edit(&self, text: &str) -> Result<String> {
        if !self.interactive {
            return Ok(text.to_string());
        }

        let editor = editor_command(|name| env::var(name).ok());
        let mut parts = editor.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| PolishError::Config("editor command is empty".to_string()))?;

        let file = tempfile::Builder::new()
            .prefix("prpolish-")
            .suffix(".md")
            .tempfile()?;
        fs::write(file.path(), text)?;

        run_interactive(Command::new(program).args(parts).arg(file.path()))?;

        Ok(fs::read_to_string(file.path())?)
    }
}

fn parse_yes_no(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// `$VISUAL`, then `$EDITOR`, then `vi`
fn editor_command<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}
