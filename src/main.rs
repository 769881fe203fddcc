//! Terrawork CLI - Terraform-backed containers and instances, tracked per workspace

use anyhow::Context;
use clap::Parser;

use terrawork::cli::{Args, AwsArgs, DockerAction, OpenStackArgs, SubCommand, VmwareArgs, WorkspaceAction};
use terrawork::tfconfig::{parse_port_list, AwsInstance, OpenStackInstance, Secret, VsphereInstance};
use terrawork::{
    format_output, ConfigStore, ContainerInventory, ContainerRequest, DockerCli, InstanceSpec,
    Outcome, Provisioner, Settings, TerraformCli, WorkspaceManager,
};

fn main() {
    let args = Args::parse();
    args.init_logging();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let settings = Settings::load(args.config.as_deref())
        .context("failed to load settings")?
        .with_overrides(args.registry.clone(), args.work_root.clone());
    log::debug!("registry: {}", settings.registry.display());

    let manager = WorkspaceManager::new(
        ConfigStore::new(settings.registry),
        TerraformCli::new(settings.tools.terraform),
        DockerCli::new(settings.tools.docker),
        settings.work_root,
    )
    .with_docker_provider(settings.docker);

    let format = args.output_format();
    let outcome = dispatch(args.command, &manager)?;
    println!("{}", format_output(&outcome, &format));
    Ok(())
}

fn dispatch<P, I>(command: Option<SubCommand>, manager: &WorkspaceManager<P, I>) -> anyhow::Result<Outcome>
where
    P: Provisioner,
    I: ContainerInventory,
{
    let outcome = match command {
        None | Some(SubCommand::Menu) => terrawork::menu::run_interactive(manager)?,

        Some(SubCommand::Workspace { action }) => match action {
            WorkspaceAction::Ensure { name } => Outcome::Workspace(
                manager
                    .ensure_workspace(&name)
                    .with_context(|| format!("could not ensure workspace '{}'", name))?,
            ),
            WorkspaceAction::List => Outcome::Workspaces(manager.list_workspaces()?),
        },

        Some(SubCommand::Docker { action }) => match action {
            DockerAction::Create {
                workspace,
                image,
                name,
                mut port,
                ports,
            } => {
                if let Some(list) = ports {
                    port.extend(parse_port_list(&list)?);
                }
                let request = ContainerRequest {
                    workspace,
                    image,
                    name,
                    ports: port,
                };
                Outcome::Provisioned(
                    manager
                        .provision_container(&request)
                        .with_context(|| format!("could not provision container '{}'", request.name))?,
                )
            }
            DockerAction::Destroy { name } => Outcome::Destroyed(
                manager
                    .destroy_container(&name)
                    .with_context(|| format!("could not destroy container '{}'", name))?,
            ),
            DockerAction::Teardown { workspace, name } => {
                Outcome::TornDown(manager.teardown_container(&workspace, &name)?)
            }
            DockerAction::List => Outcome::Containers(manager.runtime_containers()?),
        },

        Some(SubCommand::Aws(args)) => Outcome::Instance(manager.provision_instance(&aws_spec(args))?),
        Some(SubCommand::Openstack(args)) => {
            Outcome::Instance(manager.provision_instance(&openstack_spec(args))?)
        }
        Some(SubCommand::Vmware(args)) => {
            Outcome::Instance(manager.provision_instance(&vsphere_spec(args))?)
        }
        Some(SubCommand::Teardown { kind }) => {
            Outcome::InstanceTornDown(manager.teardown_instance(kind)?)
        }
    };
    Ok(outcome)
}

fn aws_spec(args: AwsArgs) -> InstanceSpec {
    InstanceSpec::Aws(AwsInstance {
        region: args.region,
        ami: args.ami,
        instance_type: args.instance_type,
        name: args.name,
    })
}

fn openstack_spec(args: OpenStackArgs) -> InstanceSpec {
    InstanceSpec::OpenStack(OpenStackInstance {
        auth_url: args.auth_url,
        username: args.username,
        password: Secret::new(args.password),
        tenant_name: args.tenant_name,
        flavor: args.flavor,
        image: args.image,
        instance_name: args.instance_name,
    })
}

fn vsphere_spec(args: VmwareArgs) -> InstanceSpec {
    InstanceSpec::Vsphere(VsphereInstance {
        server: args.server,
        username: args.username,
        password: Secret::new(args.password),
        datacenter: args.datacenter,
        folder: args.folder,
        resource_pool: args.resource_pool,
        template: args.template,
        vm_name: args.vm_name,
    })
}
