//! Workspace registry
//!
//! The registry maps each workspace name to the ordered list of container
//! names provisioned into it. It is the only persistent state Terrawork
//! owns; everything else lives in Terraform state or the container runtime.

mod store;

pub use store::ConfigStore;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerraworkError};

/// Allowed shape for workspace and container names
const NAME_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_.-]*$";

fn name_regex() -> Result<&'static Regex> {
    static NAME_RE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    NAME_RE
        .get_or_init(|| Regex::new(NAME_PATTERN))
        .as_ref()
        .map_err(|e| TerraworkError::ConfigError(format!("invalid name pattern: {}", e)))
}

/// Reject names Docker would refuse or that could escape a working directory
pub fn validate_name(name: &str) -> Result<()> {
    if name_regex()?.is_match(name) {
        Ok(())
    } else {
        Err(TerraworkError::InvalidName(name.to_string()))
    }
}

/// Workspace name -> container names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    workspaces: BTreeMap<String, Vec<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_workspace(&self, workspace: &str) -> bool {
        self.workspaces.contains_key(workspace)
    }

    /// Create `workspace` with no containers. Returns true if it was added.
    pub fn ensure(&mut self, workspace: &str) -> bool {
        if self.workspaces.contains_key(workspace) {
            return false;
        }
        self.workspaces.insert(workspace.to_string(), Vec::new());
        true
    }

    /// Append `container` to `workspace` unless already listed there.
    /// The workspace is created if missing. Returns true if appended.
    pub fn record(&mut self, workspace: &str, container: &str) -> bool {
        let list = self.workspaces.entry(workspace.to_string()).or_default();
        if list.iter().any(|c| c == container) {
            return false;
        }
        list.push(container.to_string());
        true
    }

    /// Remove `container` from one workspace. Returns true if it was listed.
    pub fn forget_in(&mut self, workspace: &str, container: &str) -> bool {
        match self.workspaces.get_mut(workspace) {
            Some(list) => {
                let before = list.len();
                list.retain(|c| c != container);
                list.len() != before
            }
            None => false,
        }
    }

    /// Remove `container` from every workspace, returning the workspaces
    /// that listed it. Workspaces themselves are kept even when emptied.
    pub fn forget(&mut self, container: &str) -> Vec<String> {
        let mut affected = Vec::new();
        for (workspace, list) in self.workspaces.iter_mut() {
            let before = list.len();
            list.retain(|c| c != container);
            if list.len() != before {
                affected.push(workspace.clone());
            }
        }
        affected
    }

    /// Drop `workspace` only if it has no containers. Returns true if dropped.
    pub fn remove_if_empty(&mut self, workspace: &str) -> bool {
        match self.workspaces.get(workspace) {
            Some(list) if list.is_empty() => {
                self.workspaces.remove(workspace);
                true
            }
            _ => false,
        }
    }

    pub fn containers(&self, workspace: &str) -> Option<&[String]> {
        self.workspaces.get(workspace).map(|v| v.as_slice())
    }

    /// Workspaces in name order
    pub fn workspaces(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.workspaces
            .iter()
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}
