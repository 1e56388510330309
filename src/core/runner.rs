//! External command execution with consistent error handling.
//!
//! Every command streams output to the terminal (inherited stdio). Any
//! failure is fatal to the pipeline: a non-zero exit becomes a
//! `command.failed` error carrying the child's exit code.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};
use crate::log_status;

/// Run an external command, streaming output to the terminal.
///
/// `env` entries are layered over the inherited environment. Returns an
/// error on spawn failure or non-zero exit; the caller propagates it.
pub fn run(program: &str, args: &[&str], cwd: Option<&Path>, env: &[(&str, String)]) -> Result<()> {
    let display = display_command(program, args);
    log_status!("run", "{}", display);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    for (key, value) in env {
        cmd.env(key, value);
    }

    let status = cmd
        .status()
        .map_err(|e| Error::command_spawn_failed(&display, e.to_string()))?;

    if !status.success() {
        return Err(Error::command_failed(&display, status.code().unwrap_or(1)));
    }

    Ok(())
}

/// Render a command line for logging and error messages.
/// Arguments with whitespace or quotes are single-quoted.
pub fn display_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![quote_for_display(program)];
    parts.extend(args.iter().map(|a| quote_for_display(a)));
    parts.join(" ")
}

fn quote_for_display(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    if arg.contains([' ', '\t', '\'', '"', '$']) {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_succeeds_for_zero_exit() {
        assert!(run("true", &[], None, &[]).is_ok());
    }

    #[test]
    fn run_propagates_nonzero_exit_code() {
        let err = run("false", &[], None, &[]).unwrap_err();
        assert_eq!(err.code.as_str(), "command.failed");
        assert_eq!(err.exit_code, Some(1));
    }

    #[test]
    fn run_reports_spawn_failure() {
        let err = run("ampdeploy-no-such-tool-xyz", &[], None, &[]).unwrap_err();
        assert_eq!(err.code.as_str(), "command.spawn_failed");
        assert!(err.exit_code.is_none());
    }

    #[test]
    fn display_command_quotes_only_when_needed() {
        assert_eq!(
            display_command("amplify", &["init", "--yes"]),
            "amplify init --yes"
        );
        assert_eq!(
            display_command("sh", &["-c", "echo hi"]),
            "sh -c 'echo hi'"
        );
    }

    #[test]
    fn display_command_escapes_single_quotes() {
        assert_eq!(display_command("echo", &["it's"]), "echo 'it'\\''s'");
    }
}
