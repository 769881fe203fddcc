//! Results returned by workspace operations

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tfconfig::{InfraKind, PortMapping};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsureReport {
    pub workspace: String,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub workspace: String,
    pub container: String,
    pub image: String,
    pub ports: Vec<PortMapping>,
    pub directory: PathBuf,
    /// The workspace did not exist before this call
    pub workspace_created: bool,
    /// A runtime container with the same name was stopped and removed first
    pub replaced_existing: bool,
    /// Image already present locally; `None` when the runtime could not say
    pub image_cached: Option<bool>,
    /// The container was newly appended to the workspace
    pub recorded: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    pub workspace: String,
    pub container: String,
    pub directory: PathBuf,
    /// The container was listed in the workspace and has been removed
    pub forgotten: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyReport {
    pub container: String,
    /// Workspaces that listed the container before it was destroyed
    pub workspaces: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceReport {
    pub kind: InfraKind,
    pub name: String,
    pub directory: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceTeardownReport {
    pub kind: InfraKind,
    pub directory: PathBuf,
}
