use std::path::Path;
use std::process::Command;

use crate::error::{Result, TerraworkError};

/// Captured result of an external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Run a tool to completion and capture both streams.
///
/// Blocks until the process exits. A process killed by a signal reports
/// status -1. Failing to spawn the tool at all is `ToolUnavailable`.
pub fn run_captured(tool: &str, args: &[&str], dir: Option<&Path>) -> Result<CommandOutput> {
    let mut cmd = Command::new(tool);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    log::debug!("run: {} {}", tool, args.join(" "));
    let output = cmd.output().map_err(|source| TerraworkError::ToolUnavailable {
        tool: tool.to_string(),
        source,
    })?;

    Ok(CommandOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let result = run_captured("terrawork-definitely-not-installed", &["--version"], None);
        assert!(matches!(
            result,
            Err(TerraworkError::ToolUnavailable { ref tool, .. }) if tool == "terrawork-definitely-not-installed"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_status_and_streams() {
        let out = run_captured("sh", &["-c", "echo out; echo err >&2; exit 3"], None).unwrap();
        assert_eq!(out.status, 3);
        assert!(!out.success());
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_captured("pwd", &[], Some(dir.path())).unwrap();
        assert!(out.success());
        let reported = std::path::PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
