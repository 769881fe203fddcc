use super::{image_repository, ContainerInventory};
use crate::common::{run_captured, CommandOutput};
use crate::error::{Result, TerraworkError};

/// Talks to the Docker daemon through the `docker` CLI
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        run_captured(&self.binary, args, None)
    }

    fn checked(&self, action: &str, target: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(TerraworkError::RuntimeFailed {
                action: action.to_string(),
                target: target.to_string(),
                stderr: output.stderr.trim_end().to_string(),
            })
        }
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

fn non_empty_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl ContainerInventory for DockerCli {
    fn list_names(&self) -> Result<Vec<String>> {
        let out = self.checked("ps", "containers", &["ps", "-a", "--format", "{{.Names}}"])?;
        Ok(non_empty_lines(&out.stdout))
    }

    fn exists(&self, name: &str) -> Result<bool> {
        let out = self.run(&["container", "inspect", "--format", "{{.Name}}", name])?;
        if out.success() {
            return Ok(true);
        }
        if out.stderr.contains("No such") {
            return Ok(false);
        }
        Err(TerraworkError::RuntimeFailed {
            action: "inspect".to_string(),
            target: name.to_string(),
            stderr: out.stderr.trim_end().to_string(),
        })
    }

    fn image_present(&self, image: &str) -> Result<bool> {
        let out = self.checked("images", image, &["images", "--format", "{{.Repository}}"])?;
        let repo = image_repository(image);
        Ok(non_empty_lines(&out.stdout).iter().any(|r| r == repo))
    }

    fn stop(&self, name: &str) -> Result<()> {
        self.checked("stop", name, &["stop", name]).map(|_| ())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.checked("rm", name, &["rm", name]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_lines() {
        assert_eq!(
            non_empty_lines("web\n\n  db \n"),
            vec!["web".to_string(), "db".to_string()]
        );
        assert!(non_empty_lines("").is_empty());
    }

    #[test]
    fn test_missing_binary_is_tool_unavailable() {
        let docker = DockerCli::new("docker-not-on-this-path");
        assert!(matches!(
            docker.list_names(),
            Err(TerraworkError::ToolUnavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_stop_is_runtime_failure() {
        // `false` exits 1 for any arguments
        let docker = DockerCli::new("false");
        match docker.stop("web") {
            Err(TerraworkError::RuntimeFailed { action, target, .. }) => {
                assert_eq!(action, "stop");
                assert_eq!(target, "web");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_list_names_parses_output() {
        // `echo` prints its argv, standing in for `docker ps`
        let docker = DockerCli::new("echo");
        let names = docker.list_names().unwrap();
        assert_eq!(names, vec!["ps -a --format {{.Names}}".to_string()]);
    }
}
