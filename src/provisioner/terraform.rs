use std::path::Path;

use super::Provisioner;
use crate::common::{run_captured, CommandOutput};
use crate::error::Result;

/// Runs the `terraform` executable found on PATH (or a configured path)
#[derive(Debug, Clone)]
pub struct TerraformCli {
    binary: String,
}

impl TerraformCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<CommandOutput> {
        run_captured(&self.binary, args, Some(dir))
    }
}

impl Default for TerraformCli {
    fn default() -> Self {
        Self::new("terraform")
    }
}

impl Provisioner for TerraformCli {
    fn init(&self, dir: &Path) -> Result<CommandOutput> {
        self.run(dir, &["init", "-input=false", "-no-color"])
    }

    fn apply(&self, dir: &Path) -> Result<CommandOutput> {
        self.run(dir, &["apply", "-auto-approve", "-input=false", "-no-color"])
    }

    fn destroy(&self, dir: &Path) -> Result<CommandOutput> {
        self.run(dir, &["destroy", "-auto-approve", "-input=false", "-no-color"])
    }
}
