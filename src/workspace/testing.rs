//! In-memory adapters for exercising the manager without Terraform or Docker

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use super::WorkspaceManager;
use crate::common::CommandOutput;
use crate::error::{Result, TerraworkError};
use crate::inventory::ContainerInventory;
use crate::provisioner::Provisioner;
use crate::registry::ConfigStore;
use crate::tfconfig::CONFIG_FILE;

pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct FakeProvisioner {
    pub log: CallLog,
    pub fail_on: Option<&'static str>,
}

impl FakeProvisioner {
    fn step(&self, step: &str, dir: &Path) -> Result<CommandOutput> {
        assert!(dir.join(CONFIG_FILE).exists(), "config missing for {}", step);
        self.log.borrow_mut().push(step.to_string());
        let failed = self.fail_on == Some(step);
        Ok(CommandOutput {
            status: if failed { 1 } else { 0 },
            stdout: format!("{} ok", step),
            stderr: if failed {
                format!("{} exploded", step)
            } else {
                String::new()
            },
        })
    }
}

impl Provisioner for FakeProvisioner {
    fn init(&self, dir: &Path) -> Result<CommandOutput> {
        self.step("init", dir)
    }

    fn apply(&self, dir: &Path) -> Result<CommandOutput> {
        self.step("apply", dir)
    }

    fn destroy(&self, dir: &Path) -> Result<CommandOutput> {
        self.step("destroy", dir)
    }
}

pub struct FakeInventory {
    pub log: CallLog,
    pub running: RefCell<Vec<String>>,
    pub images: Vec<String>,
    /// Every inspect fails, as if the daemon were down
    pub unreachable: bool,
}

impl ContainerInventory for FakeInventory {
    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.running.borrow().clone())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        if self.unreachable {
            return Err(TerraworkError::RuntimeFailed {
                action: "inspect".to_string(),
                target: name.to_string(),
                stderr: "daemon down".to_string(),
            });
        }
        Ok(self.running.borrow().iter().any(|n| n == name))
    }

    fn image_present(&self, image: &str) -> Result<bool> {
        Ok(self.images.iter().any(|i| i == image))
    }

    fn stop(&self, name: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("stop {}", name));
        if self.exists(name)? {
            Ok(())
        } else {
            Err(TerraworkError::RuntimeFailed {
                action: "stop".to_string(),
                target: name.to_string(),
                stderr: "No such container".to_string(),
            })
        }
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("remove {}", name));
        self.running.borrow_mut().retain(|n| n != name);
        Ok(())
    }
}

/// Temp directory, shared call log and both fakes
pub struct Harness {
    pub dir: tempfile::TempDir,
    pub log: CallLog,
    pub provisioner: FakeProvisioner,
    pub inventory: FakeInventory,
}

impl Harness {
    pub fn new() -> Self {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        Self {
            dir: tempfile::tempdir().unwrap(),
            provisioner: FakeProvisioner {
                log: log.clone(),
                fail_on: None,
            },
            inventory: FakeInventory {
                log: log.clone(),
                running: RefCell::new(Vec::new()),
                images: vec!["nginx:latest".to_string()],
                unreachable: false,
            },
            log,
        }
    }

    pub fn failing(step: &'static str) -> Self {
        let mut harness = Self::new();
        harness.provisioner.fail_on = Some(step);
        harness
    }

    pub fn unreachable_runtime() -> Self {
        let mut harness = Self::new();
        harness.inventory.unreachable = true;
        harness
    }

    pub fn manager(&self) -> WorkspaceManager<&FakeProvisioner, &FakeInventory> {
        WorkspaceManager::new(
            ConfigStore::new(self.dir.path().join("workspaces.json")),
            &self.provisioner,
            &self.inventory,
            self.dir.path(),
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}
