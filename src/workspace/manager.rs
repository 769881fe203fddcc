//! Workspace manager for provisioning and tearing down containers
//!
//! Each Docker container gets its own Terraform working directory under
//! `<work_root>/terraform_docker/<workspace>/<container>`, so provisioning
//! one container never replaces another in the same workspace.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{Result, TerraworkError};
use crate::inventory::ContainerInventory;
use crate::provisioner::{check_step, Provisioner};
use crate::registry::{validate_name, ConfigStore, Registry};
use crate::tfconfig::{DockerContainer, DockerProvider, InfraKind, InstanceSpec, PortMapping, CONFIG_FILE};

use super::report::{
    DestroyReport, EnsureReport, InstanceReport, InstanceTeardownReport, ProvisionReport,
    TeardownReport,
};

/// Directory under the work root holding per-workspace container configs
pub const DOCKER_DIR: &str = "terraform_docker";

/// What to run, and which workspace it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRequest {
    pub workspace: String,
    pub image: String,
    pub name: String,
    pub ports: Vec<PortMapping>,
}

impl ContainerRequest {
    fn container(&self) -> DockerContainer {
        DockerContainer {
            image: self.image.clone(),
            name: self.name.clone(),
            ports: self.ports.clone(),
        }
    }
}

/// Coordinates the registry with the provisioner and container runtime
#[derive(Debug)]
pub struct WorkspaceManager<P, I> {
    store: ConfigStore,
    provisioner: P,
    inventory: I,
    work_root: PathBuf,
    docker: DockerProvider,
}

impl<P: Provisioner, I: ContainerInventory> WorkspaceManager<P, I> {
    pub fn new(store: ConfigStore, provisioner: P, inventory: I, work_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            provisioner,
            inventory,
            work_root: work_root.into(),
            docker: DockerProvider::default(),
        }
    }

    pub fn with_docker_provider(mut self, docker: DockerProvider) -> Self {
        self.docker = docker;
        self
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn container_dir(&self, workspace: &str, container: &str) -> PathBuf {
        self.work_root.join(DOCKER_DIR).join(workspace).join(container)
    }

    pub fn instance_dir(&self, kind: InfraKind) -> PathBuf {
        self.work_root.join(kind.dir_name())
    }

    /// Create the workspace if it is missing. Persists only on creation.
    pub fn ensure_workspace(&self, workspace: &str) -> Result<EnsureReport> {
        validate_name(workspace)?;
        let created = self.store.update(|registry| {
            let created = registry.ensure(workspace);
            (created, created)
        })?;

        if created {
            log::info!("Workspace '{}' created", workspace);
        } else {
            log::info!("Workspace '{}' already exists", workspace);
        }

        Ok(EnsureReport {
            workspace: workspace.to_string(),
            created,
        })
    }

    /// Provision a Docker container through Terraform and record it.
    ///
    /// A container already running under the same name is stopped and
    /// removed first without asking. If any step after the workspace check
    /// fails, the registry is left as it was before the call.
    pub fn provision_container(&self, request: &ContainerRequest) -> Result<ProvisionReport> {
        validate_name(&request.workspace)?;
        validate_name(&request.name)?;
        if request.image.trim().is_empty() {
            return Err(TerraworkError::ConfigError(
                "image must not be empty".to_string(),
            ));
        }

        let started_at = Utc::now();
        let ensured = self.ensure_workspace(&request.workspace)?;

        let (dir, replaced_existing, image_cached) = match self.run_container(request) {
            Ok(applied) => applied,
            Err(e) => {
                if ensured.created {
                    self.rollback_workspace(&request.workspace);
                }
                return Err(e);
            }
        };

        let recorded = self.store.update(|registry| {
            let added = registry.record(&request.workspace, &request.name);
            (added, added)
        })?;
        if !recorded {
            log::info!(
                "Container '{}' is already in workspace '{}'",
                request.name,
                request.workspace
            );
        }

        Ok(ProvisionReport {
            workspace: request.workspace.clone(),
            container: request.name.clone(),
            image: request.image.clone(),
            ports: request.ports.clone(),
            directory: dir,
            workspace_created: ensured.created,
            replaced_existing,
            image_cached,
            recorded,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Run `terraform destroy` for a provisioned container and forget it
    pub fn teardown_container(&self, workspace: &str, container: &str) -> Result<TeardownReport> {
        validate_name(workspace)?;
        validate_name(container)?;

        let dir = self.container_dir(workspace, container);
        if !dir.join(CONFIG_FILE).exists() {
            return Err(TerraworkError::NotProvisioned(dir));
        }

        log::info!("Destroying Terraform infrastructure...");
        let stdout = check_step("destroy", self.provisioner.destroy(&dir)?)?;
        log::debug!("{}", stdout);

        let forgotten = self.store.update(|registry| {
            let removed = registry.forget_in(workspace, container);
            (removed, removed)
        })?;

        Ok(TeardownReport {
            workspace: workspace.to_string(),
            container: container.to_string(),
            directory: dir,
            forgotten,
        })
    }

    /// Stop and remove a container in the runtime, then drop it from
    /// every workspace that lists it
    pub fn destroy_container(&self, name: &str) -> Result<DestroyReport> {
        validate_name(name)?;

        self.inventory.stop(name)?;
        self.inventory.remove(name)?;
        log::info!("Container {} has been destroyed", name);

        let workspaces = self.store.update(|registry| {
            let affected = registry.forget(name);
            (!affected.is_empty(), affected)
        })?;

        Ok(DestroyReport {
            container: name.to_string(),
            workspaces,
        })
    }

    pub fn list_workspaces(&self) -> Result<Registry> {
        self.store.load()
    }

    /// Names of every container the runtime knows about
    pub fn runtime_containers(&self) -> Result<Vec<String>> {
        self.inventory.list_names()
    }

    /// Provision a cloud or VMware instance. The registry is not involved.
    pub fn provision_instance(&self, spec: &InstanceSpec) -> Result<InstanceReport> {
        let started_at = Utc::now();
        let kind = spec.kind();
        let dir = self.instance_dir(kind);

        spec.render()?.write_to(&dir)?;
        self.init_and_apply(&dir)?;

        Ok(InstanceReport {
            kind,
            name: spec.display_name().to_string(),
            directory: dir,
            started_at,
            finished_at: Utc::now(),
        })
    }

    pub fn teardown_instance(&self, kind: InfraKind) -> Result<InstanceTeardownReport> {
        let dir = self.instance_dir(kind);
        if !dir.join(CONFIG_FILE).exists() {
            return Err(TerraworkError::NotProvisioned(dir));
        }

        log::info!("Destroying {}...", kind.label());
        let stdout = check_step("destroy", self.provisioner.destroy(&dir)?)?;
        log::debug!("{}", stdout);

        Ok(InstanceTeardownReport {
            kind,
            directory: dir,
        })
    }

    /// Render, replace any same-named container, then init and apply.
    /// Returns the working directory, whether a container was replaced and
    /// whether the image was already cached.
    fn run_container(&self, request: &ContainerRequest) -> Result<(PathBuf, bool, Option<bool>)> {
        let dir = self.container_dir(&request.workspace, &request.name);
        let config = request.container().render(&self.docker)?;
        let config_path = config.write_to(&dir)?;
        log::debug!("wrote {}", config_path.display());

        let replaced_existing = self.inventory.exists(&request.name)?;
        if replaced_existing {
            log::warn!(
                "Container '{}' already exists. Destroying it...",
                request.name
            );
            self.inventory.stop(&request.name)?;
            self.inventory.remove(&request.name)?;
        }

        let image_cached = match self.inventory.image_present(&request.image) {
            Ok(true) => {
                log::info!("Image '{}' already exists. Skipping image pull", request.image);
                Some(true)
            }
            Ok(false) => {
                log::info!(
                    "Image '{}' does not exist locally. It will be pulled during apply",
                    request.image
                );
                Some(false)
            }
            Err(e) => {
                log::debug!("could not check local images: {}", e);
                None
            }
        };

        self.init_and_apply(&dir)?;
        Ok((dir, replaced_existing, image_cached))
    }

    /// Drop a workspace created by a provision that then failed
    fn rollback_workspace(&self, workspace: &str) {
        let result = self.store.update(|registry| {
            let dropped = registry.remove_if_empty(workspace);
            (dropped, ())
        });
        if let Err(e) = result {
            log::warn!("could not remove workspace '{}' after failure: {}", workspace, e);
        }
    }

    fn init_and_apply(&self, dir: &Path) -> Result<()> {
        log::info!("Initializing Terraform...");
        let stdout = check_step("init", self.provisioner.init(dir)?)?;
        log::debug!("{}", stdout);

        log::info!("Applying Terraform configuration...");
        let stdout = check_step("apply", self.provisioner.apply(dir)?)?;
        log::debug!("{}", stdout);
        Ok(())
    }
}
