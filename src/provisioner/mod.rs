//! Provisioner adapter
//!
//! Terraform is treated as an opaque external tool: Terrawork writes a
//! configuration into a working directory and asks the provisioner to
//! init, apply or destroy it. Callers decide what a non-zero status means.

mod terraform;

pub use terraform::TerraformCli;

use std::path::Path;

use crate::common::CommandOutput;
use crate::error::{Result, TerraworkError};

pub trait Provisioner {
    fn init(&self, dir: &Path) -> Result<CommandOutput>;
    fn apply(&self, dir: &Path) -> Result<CommandOutput>;
    fn destroy(&self, dir: &Path) -> Result<CommandOutput>;
}

impl<P: Provisioner + ?Sized> Provisioner for &P {
    fn init(&self, dir: &Path) -> Result<CommandOutput> {
        (**self).init(dir)
    }

    fn apply(&self, dir: &Path) -> Result<CommandOutput> {
        (**self).apply(dir)
    }

    fn destroy(&self, dir: &Path) -> Result<CommandOutput> {
        (**self).destroy(dir)
    }
}

/// Turn a non-zero status into `ProvisionerFailed`, keeping stdout otherwise
pub fn check_step(step: &str, output: CommandOutput) -> Result<String> {
    if output.success() {
        Ok(output.stdout)
    } else {
        Err(TerraworkError::ProvisionerFailed {
            step: step.to_string(),
            status: output.status,
            stderr: output.stderr.trim_end().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_step_success_returns_stdout() {
        let out = CommandOutput {
            status: 0,
            stdout: "Apply complete!".to_string(),
            stderr: String::new(),
        };
        assert_eq!(check_step("apply", out).unwrap(), "Apply complete!");
    }

    #[test]
    fn test_check_step_failure_carries_stderr() {
        let out = CommandOutput {
            status: 1,
            stdout: String::new(),
            stderr: "Error: image not found\n".to_string(),
        };
        match check_step("apply", out) {
            Err(TerraworkError::ProvisionerFailed { step, status, stderr }) => {
                assert_eq!(step, "apply");
                assert_eq!(status, 1);
                assert_eq!(stderr, "Error: image not found");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
