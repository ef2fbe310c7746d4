//! Typed wrappers for running external programs
//!
//! Every subprocess (git push, the PR CLI, clipboard helpers, the editor)
//! goes through here so failures carry the exit code and stderr verbatim.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{PolishError, Result};

/// Short human-readable form of a command: program plus its subcommand
fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args().take(2))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_error(cmd: &Command, source: std::io::Error) -> PolishError {
    PolishError::Spawn {
        program: cmd.get_program().to_string_lossy().into_owned(),
        source,
    }
}

/// Run a command to completion, returning its trimmed stdout
///
/// A non-zero exit becomes [`PolishError::Subprocess`] with the child's
/// exit code and stderr.
pub fn run_checked(cmd: &mut Command) -> Result<String> {
    let description = describe(cmd);
    debug!(command = %description, "running subprocess");

    let output = cmd.output().map_err(|e| spawn_error(cmd, e))?;

    if !output.status.success() {
        return Err(PolishError::Subprocess {
            command: description,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a command attached to the user's terminal (editor, interactive login)
pub fn run_interactive(cmd: &mut Command) -> Result<()> {
    let description = describe(cmd);
    debug!(command = %description, "running interactive subprocess");

    let status = cmd.status().map_err(|e| spawn_error(cmd, e))?;
    if !status.success() {
        return Err(PolishError::Subprocess {
            command: description,
            code: status.code(),
            stderr: String::new(),
        });
    }
    Ok(())
}

/// Run a command, feeding `input` on its stdin
pub fn run_with_stdin(cmd: &mut Command, input: &str) -> Result<()> {
    let description = describe(cmd);
    debug!(command = %description, "running subprocess with stdin");

    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(cmd, e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(PolishError::Subprocess {
            command: description,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_run_checked_returns_stdout() {
        let out = run_checked(Command::new("sh").args(["-c", "echo hello"])).unwrap();
        assert_eq!(out, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_checked_surfaces_exit_code_and_stderr() {
        let err = run_checked(Command::new("sh").args(["-c", "echo boom >&2; exit 3"]))
            .unwrap_err();
        match err {
            PolishError::Subprocess {
                command,
                code,
                stderr,
            } => {
                assert_eq!(command, "sh -c echo boom >&2; exit 3");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_stdin() {
        assert!(run_with_stdin(Command::new("sh").args(["-c", "cat > /dev/null"]), "x").is_ok());
        assert!(run_with_stdin(Command::new("sh").args(["-c", "exit 2"]), "x").is_err());
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run_checked(&mut Command::new("prpolish-definitely-not-a-program")).unwrap_err();
        assert!(matches!(err, PolishError::Spawn { .. }));
    }

    #[test]
    fn test_describe_keeps_subcommand() {
        let mut cmd = Command::new("gh");
        cmd.args(["pr", "create", "--title", "feat: add login"]);
        assert_eq!(describe(&cmd), "gh pr create");
        assert_eq!(describe(&Command::new("pbcopy")), "pbcopy");
    }
}
