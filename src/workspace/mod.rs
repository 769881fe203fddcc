//! Workspace management
//!
//! The [`WorkspaceManager`] ties the registry, the Terraform configuration
//! builder and the two external adapters together. It is the only place
//! that keeps the registry in step with what was actually provisioned.

mod manager;
mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use manager::{ContainerRequest, WorkspaceManager, DOCKER_DIR};
pub use report::{
    DestroyReport, EnsureReport, InstanceReport, InstanceTeardownReport, ProvisionReport,
    TeardownReport,
};
