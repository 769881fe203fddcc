//! Numbered-menu flow layered over the workspace manager
//!
//! The flow only talks to a [`Prompter`], so it runs the same against a
//! terminal line editor or a scripted list of answers.

use crate::error::{Result, TerraworkError};
use crate::inventory::ContainerInventory;
use crate::output::{human::format_human, Outcome};
use crate::provisioner::Provisioner;
use crate::tfconfig::{
    parse_port_list, AwsInstance, InstanceSpec, OpenStackInstance, Secret, VsphereInstance,
};
use crate::workspace::{ContainerRequest, WorkspaceManager};

pub trait Prompter {
    /// Read one answer, trimmed. End of input is `Cancelled`.
    fn ask(&mut self, prompt: &str) -> Result<String>;
    fn say(&mut self, text: &str);
}

/// Turn a 1-based menu answer into a 0-based index below `len`
pub fn parse_selection(input: &str, len: usize) -> Result<usize> {
    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| TerraworkError::InvalidSelection("Please enter a valid number.".to_string()))?;
    if choice == 0 || choice > len {
        return Err(TerraworkError::InvalidSelection(format!(
            "Invalid choice: {} (expected 1-{})",
            choice, len
        )));
    }
    Ok(choice - 1)
}

fn ask_required<P: Prompter>(prompter: &mut P, prompt: &str, field: &str) -> Result<String> {
    let answer = prompter.ask(prompt)?;
    if answer.is_empty() {
        return Err(TerraworkError::ConfigError(format!("{} is required", field)));
    }
    Ok(answer)
}

pub fn run_menu<P, V, I>(prompter: &mut P, manager: &WorkspaceManager<V, I>) -> Result<Outcome>
where
    P: Prompter,
    V: Provisioner,
    I: ContainerInventory,
{
    prompter.say(
        "Choose infrastructure to create:\n\
         1. AWS EC2 Instance\n\
         2. Docker Container\n\
         3. OpenStack Instance\n\
         4. VMware Instance",
    );

    let choice = prompter.ask("Enter your choice (1/2/3/4): ")?;
    match choice.as_str() {
        "1" => {
            let spec = InstanceSpec::Aws(AwsInstance {
                region: ask_required(prompter, "Enter AWS region: ", "region")?,
                ami: ask_required(prompter, "Enter AMI ID: ", "AMI ID")?,
                instance_type: ask_required(prompter, "Enter instance type: ", "instance type")?,
                name: ask_required(prompter, "Enter instance name: ", "instance name")?,
            });
            manager.provision_instance(&spec).map(Outcome::Instance)
        }
        "2" => docker_options(prompter, manager),
        "3" => {
            let spec = InstanceSpec::OpenStack(OpenStackInstance {
                auth_url: ask_required(prompter, "Enter OpenStack auth URL: ", "auth URL")?,
                username: ask_required(prompter, "Enter OpenStack username: ", "username")?,
                password: Secret::new(ask_required(
                    prompter,
                    "Enter OpenStack password: ",
                    "password",
                )?),
                tenant_name: ask_required(prompter, "Enter OpenStack tenant name: ", "tenant name")?,
                flavor: ask_required(prompter, "Enter OpenStack flavor ID: ", "flavor ID")?,
                image: ask_required(prompter, "Enter OpenStack image ID: ", "image ID")?,
                instance_name: "example-instance".to_string(),
            });
            manager.provision_instance(&spec).map(Outcome::Instance)
        }
        "4" => {
            let spec = InstanceSpec::Vsphere(VsphereInstance {
                server: ask_required(prompter, "Enter VMware vSphere server: ", "server")?,
                username: ask_required(prompter, "Enter VMware username: ", "username")?,
                password: Secret::new(ask_required(
                    prompter,
                    "Enter VMware password: ",
                    "password",
                )?),
                datacenter: ask_required(prompter, "Enter VMware datacenter: ", "datacenter")?,
                folder: ask_required(prompter, "Enter VMware folder: ", "folder")?,
                resource_pool: ask_required(
                    prompter,
                    "Enter VMware resource pool: ",
                    "resource pool",
                )?,
                template: ask_required(prompter, "Enter VMware VM template ID: ", "template ID")?,
                vm_name: "example-vm".to_string(),
            });
            manager.provision_instance(&spec).map(Outcome::Instance)
        }
        other => Err(TerraworkError::InvalidSelection(format!(
            "Invalid choice: '{}'",
            other
        ))),
    }
}

fn docker_options<P, V, I>(prompter: &mut P, manager: &WorkspaceManager<V, I>) -> Result<Outcome>
where
    P: Prompter,
    V: Provisioner,
    I: ContainerInventory,
{
    prompter.say(
        "Docker Options:\n\
         1. Create a new container\n\
         2. Destroy an existing container\n\
         3. List workspaces",
    );

    let choice = prompter.ask("Enter your choice (1/2/3): ")?;
    match choice.as_str() {
        "1" => create_container(prompter, manager),
        "2" => destroy_selected_container(prompter, manager),
        "3" => manager.list_workspaces().map(Outcome::Workspaces),
        other => Err(TerraworkError::InvalidSelection(format!(
            "Invalid choice: '{}'",
            other
        ))),
    }
}

fn create_container<P, V, I>(prompter: &mut P, manager: &WorkspaceManager<V, I>) -> Result<Outcome>
where
    P: Prompter,
    V: Provisioner,
    I: ContainerInventory,
{
    let workspace = prompter.ask("Enter the workspace name: ")?;
    let image = ask_required(prompter, "Enter Docker image (e.g., nginx:latest): ", "image")?;
    let name = prompter.ask("Enter container name: ")?;
    let ports = parse_port_list(&prompter.ask(
        "Enter port mappings (format: external:internal, e.g., 8080:80,443:443): ",
    )?)?;

    let request = ContainerRequest {
        workspace,
        image,
        name,
        ports,
    };
    let report = manager.provision_container(&request)?;
    prompter.say(&format_human(&Outcome::Provisioned(report)));

    let destroy = prompter
        .ask("Do you want to destroy the infrastructure? (yes/no): ")?
        .to_lowercase();
    if destroy == "yes" {
        manager
            .teardown_container(&request.workspace, &request.name)
            .map(Outcome::TornDown)
    } else {
        Ok(Outcome::Message(format!(
            "Container '{}' kept in workspace '{}'.",
            request.name, request.workspace
        )))
    }
}

fn destroy_selected_container<P, V, I>(
    prompter: &mut P,
    manager: &WorkspaceManager<V, I>,
) -> Result<Outcome>
where
    P: Prompter,
    V: Provisioner,
    I: ContainerInventory,
{
    let containers = manager.runtime_containers()?;
    if containers.is_empty() {
        return Ok(Outcome::Message("No containers found.".to_string()));
    }

    prompter.say(&format_human(&Outcome::Containers(containers.clone())));
    let answer = prompter.ask("Enter the number of the container to destroy: ")?;
    let idx = parse_selection(&answer, containers.len())?;

    manager
        .destroy_container(&containers[idx])
        .map(Outcome::Destroyed)
}
