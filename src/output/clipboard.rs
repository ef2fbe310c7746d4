//! System clipboard access through the platform's clipboard command

use std::process::Command;

use crate::core::process::run_with_stdin;
use crate::error::{PolishError, Result};

/// Program plus arguments
type ClipboardTool = (&'static str, &'static [&'static str]);

const NO_ARGS: &[&str] = &[];

/// Clipboard commands to try, in order
fn candidates() -> Vec<ClipboardTool> {
    #[cfg(target_os = "macos")]
    {
        vec![("pbcopy", NO_ARGS)]
    }
    #[cfg(target_os = "windows")]
    {
        vec![("clip", NO_ARGS)]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
        const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

        let mut tools: Vec<ClipboardTool> = Vec::new();
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            tools.push(("wl-copy", NO_ARGS));
        }
        tools.push(("xclip", XCLIP_ARGS));
        tools.push(("xsel", XSEL_ARGS));
        tools
    }
}

/// Copy `text` to the clipboard with the first tool that works
///
/// Tools that cannot be started are skipped.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut last_error = None;
    for (program, args) in candidates() {
        match run_with_stdin(Command::new(program).args(args), text) {
            Ok(()) => return Ok(()),
            Err(PolishError::Spawn { .. }) => continue,
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        PolishError::Config(
            "no clipboard tool found (install pbcopy, wl-clipboard, xclip or xsel)".to_string(),
        )
    }))
}
