//! CLI argument parsing

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::tfconfig::{InfraKind, PortMapping};

#[derive(Parser, Debug)]
#[command(name = "terrawork")]
#[command(author, version, about = "Provision containers and instances with Terraform, tracked per workspace", long_about = None)]
pub struct Args {
    /// Subcommand; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<SubCommand>,

    /// Settings file (defaults to ./terrawork.toml when present)
    #[arg(long, global = true, env = "TERRAWORK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Registry file tracking workspaces and their containers
    #[arg(long, global = true, env = "TERRAWORK_REGISTRY")]
    pub registry: Option<PathBuf>,

    /// Directory that holds the Terraform working directories
    #[arg(long, global = true, env = "TERRAWORK_WORK_ROOT")]
    pub work_root: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Start the interactive numbered menu
    Menu,

    /// Manage workspaces in the registry
    Workspace {
        #[command(subcommand)]
        action: WorkspaceAction,
    },

    /// Create, destroy or list Docker containers
    Docker {
        #[command(subcommand)]
        action: DockerAction,
    },

    /// Create an AWS EC2 instance
    Aws(AwsArgs),

    /// Create an OpenStack instance
    Openstack(OpenStackArgs),

    /// Create a VMware vSphere virtual machine
    Vmware(VmwareArgs),

    /// Destroy the instance previously created for a provider
    Teardown {
        #[arg(value_enum)]
        kind: InfraKind,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceAction {
    /// Create a workspace if it does not exist
    Ensure {
        name: String,
    },
    /// List workspaces and their containers
    List,
}

#[derive(Subcommand, Debug)]
pub enum DockerAction {
    /// Provision a container through Terraform and record it in a workspace
    Create {
        #[arg(short, long)]
        workspace: String,

        /// Image reference, e.g. nginx:latest
        #[arg(short, long)]
        image: String,

        /// Container name
        #[arg(short, long)]
        name: String,

        /// Port mapping external:internal (repeatable)
        #[arg(short, long = "port", value_name = "EXTERNAL:INTERNAL")]
        port: Vec<PortMapping>,

        /// Comma-separated port mappings, e.g. 8080:80,443:443
        #[arg(long, value_name = "LIST")]
        ports: Option<String>,
    },

    /// Stop and remove a container and drop it from every workspace
    Destroy {
        name: String,
    },

    /// Run terraform destroy for a provisioned container
    Teardown {
        #[arg(short, long)]
        workspace: String,

        #[arg(short, long)]
        name: String,
    },

    /// List containers known to the runtime
    List,
}

#[derive(ClapArgs, Debug)]
pub struct AwsArgs {
    #[arg(long)]
    pub region: String,

    /// AMI ID
    #[arg(long)]
    pub ami: String,

    #[arg(long)]
    pub instance_type: String,

    /// Value of the Name tag
    #[arg(long)]
    pub name: String,
}

#[derive(ClapArgs, Debug)]
pub struct OpenStackArgs {
    #[arg(long)]
    pub auth_url: String,

    #[arg(long)]
    pub username: String,

    #[arg(long, env = "OPENSTACK_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub tenant_name: String,

    /// Flavor ID
    #[arg(long)]
    pub flavor: String,

    /// Image ID
    #[arg(long)]
    pub image: String,

    #[arg(long, default_value = "example-instance")]
    pub instance_name: String,
}

#[derive(ClapArgs, Debug)]
pub struct VmwareArgs {
    /// vSphere server
    #[arg(long)]
    pub server: String,

    #[arg(long)]
    pub username: String,

    #[arg(long, env = "VSPHERE_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub datacenter: String,

    #[arg(long)]
    pub folder: String,

    /// Resource pool ID
    #[arg(long)]
    pub resource_pool: String,

    /// VM template UUID
    #[arg(long)]
    pub template: String,

    #[arg(long, default_value = "example-vm")]
    pub vm_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let args = Args::try_parse_from(["terrawork"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_docker_create_parses_ports() {
        let args = Args::try_parse_from([
            "terrawork", "docker", "create", "-w", "dev", "-i", "nginx:latest", "-n", "web", "-p",
            "8080:80", "-p", "443:443",
        ])
        .unwrap();
        match args.command {
            Some(SubCommand::Docker {
                action: DockerAction::Create { port, ports, .. },
            }) => {
                assert_eq!(port, vec![PortMapping::new(8080, 80), PortMapping::new(443, 443)]);
                assert!(ports.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_bad_port_rejected_at_parse_time() {
        let result = Args::try_parse_from([
            "terrawork", "docker", "create", "-w", "dev", "-i", "nginx", "-n", "web", "-p", "8080",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let args = Args::try_parse_from(["terrawork", "-vv", "workspace", "list"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_teardown_kind() {
        let args = Args::try_parse_from(["terrawork", "teardown", "openstack"]).unwrap();
        assert!(matches!(
            args.command,
            Some(SubCommand::Teardown { kind: InfraKind::Openstack })
        ));
    }
}
