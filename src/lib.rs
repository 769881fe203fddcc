//! Terrawork - provision Docker containers and cloud instances through Terraform
//!
//! Containers are grouped into named workspaces. The workspace registry is a
//! small JSON file mapping each workspace to the containers provisioned in it,
//! and it only changes after Terraform reports success.
//!
//! # Example
//!
//! ```no_run
//! use terrawork::{ConfigStore, ContainerRequest, DockerCli, TerraformCli, WorkspaceManager};
//!
//! let manager = WorkspaceManager::new(
//!     ConfigStore::new("workspaces.json"),
//!     TerraformCli::new("terraform"),
//!     DockerCli::new("docker"),
//!     ".",
//! );
//! let request = ContainerRequest {
//!     workspace: "dev".to_string(),
//!     image: "nginx:latest".to_string(),
//!     name: "web".to_string(),
//!     ports: vec!["8080:80".parse().unwrap()],
//! };
//! let report = manager.provision_container(&request).unwrap();
//! println!("{}", report.directory.display());
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod inventory;
pub mod menu;
pub mod output;
pub mod provisioner;
pub mod registry;
pub mod tfconfig;
pub mod workspace;

pub use config::Settings;
pub use error::{Result, TerraworkError};
pub use inventory::{ContainerInventory, DockerCli};
pub use output::{format_output, Outcome, OutputFormat};
pub use provisioner::{Provisioner, TerraformCli};
pub use registry::{ConfigStore, Registry};
pub use tfconfig::{InfraKind, InstanceSpec, PortMapping};
pub use workspace::{ContainerRequest, WorkspaceManager};
