//! Terraform documents for each kind of infrastructure Terrawork creates

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::{Expr, Literal, PortMapping, TerraformConfig};
use crate::error::Result;

/// A credential that is written into configuration but never printed
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Literal(self.0.clone()).serialize(serializer)
    }
}

/// Docker provider pinning and image policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerProvider {
    pub provider_source: String,
    pub provider_version: String,
    pub keep_image_locally: bool,
}

impl Default for DockerProvider {
    fn default() -> Self {
        Self {
            provider_source: "kreuzwerker/docker".to_string(),
            provider_version: "~> 2.0".to_string(),
            keep_image_locally: true,
        }
    }
}

/// A container to run from `image` under `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerContainer {
    pub image: String,
    pub name: String,
    pub ports: Vec<PortMapping>,
}

#[derive(Serialize)]
struct DockerImageBlock {
    name: Literal,
    keep_locally: bool,
}

#[derive(Serialize)]
struct DockerContainerBlock {
    name: Literal,
    image: Expr,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<PortMapping>,
}

impl DockerContainer {
    pub fn render(&self, provider: &DockerProvider) -> Result<TerraformConfig> {
        let mut config = TerraformConfig::new();
        config.require_provider(
            "docker",
            &provider.provider_source,
            Some(&provider.provider_version),
        );
        config.provider("docker", &serde_json::json!({}))?;
        config.resource(
            "docker_image",
            "example",
            &DockerImageBlock {
                name: Literal(self.image.clone()),
                keep_locally: provider.keep_image_locally,
            },
        )?;
        config.resource(
            "docker_container",
            "example",
            &DockerContainerBlock {
                name: Literal(self.name.clone()),
                image: Expr::reference("docker_image.example.name"),
                ports: self.ports.clone(),
            },
        )?;
        Ok(config)
    }
}

/// Non-container targets, each with its own working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InfraKind {
    Aws,
    Openstack,
    Vmware,
}

impl InfraKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Aws => "terraform_aws",
            Self::Openstack => "terraform_openstack",
            Self::Vmware => "terraform_vmware",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aws => "AWS EC2 instance",
            Self::Openstack => "OpenStack instance",
            Self::Vmware => "VMware instance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsInstance {
    pub region: String,
    pub ami: String,
    pub instance_type: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenStackInstance {
    pub auth_url: String,
    pub username: String,
    pub password: Secret,
    pub tenant_name: String,
    pub flavor: String,
    pub image: String,
    pub instance_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsphereInstance {
    pub server: String,
    pub username: String,
    pub password: Secret,
    pub datacenter: String,
    pub folder: String,
    pub resource_pool: String,
    pub template: String,
    pub vm_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceSpec {
    Aws(AwsInstance),
    OpenStack(OpenStackInstance),
    Vsphere(VsphereInstance),
}

#[derive(Serialize)]
struct AwsProviderBlock {
    region: Literal,
}

#[derive(Serialize)]
struct AwsInstanceBlock {
    ami: Literal,
    instance_type: Literal,
    tags: AwsTags,
}

#[derive(Serialize)]
struct AwsTags {
    #[serde(rename = "Name")]
    name: Literal,
}

#[derive(Serialize)]
struct OpenStackProviderBlock<'a> {
    auth_url: Literal,
    user_name: Literal,
    password: &'a Secret,
    tenant_name: Literal,
}

#[derive(Serialize)]
struct OpenStackComputeBlock {
    name: Literal,
    flavor_id: Literal,
    image_id: Literal,
}

#[derive(Serialize)]
struct VsphereProviderBlock<'a> {
    user: Literal,
    password: &'a Secret,
    vsphere_server: Literal,
    allow_unverified_ssl: bool,
}

#[derive(Serialize)]
struct VsphereDatacenterBlock {
    name: Literal,
}

#[derive(Serialize)]
struct VsphereFolderBlock {
    path: Literal,
}

#[derive(Serialize)]
struct VsphereVmBlock {
    name: Literal,
    resource_pool_id: Literal,
    folder: Expr,
    clone: VsphereClone,
}

#[derive(Serialize)]
struct VsphereClone {
    template_uuid: Literal,
}

impl InstanceSpec {
    pub fn kind(&self) -> InfraKind {
        match self {
            Self::Aws(_) => InfraKind::Aws,
            Self::OpenStack(_) => InfraKind::Openstack,
            Self::Vsphere(_) => InfraKind::Vmware,
        }
    }

    /// Name the instance will carry once created
    pub fn display_name(&self) -> &str {
        match self {
            Self::Aws(spec) => &spec.name,
            Self::OpenStack(spec) => &spec.instance_name,
            Self::Vsphere(spec) => &spec.vm_name,
        }
    }

    pub fn render(&self) -> Result<TerraformConfig> {
        let mut config = TerraformConfig::new();
        match self {
            Self::Aws(spec) => {
                config.require_provider("aws", "hashicorp/aws", None);
                config.provider(
                    "aws",
                    &AwsProviderBlock {
                        region: Literal(spec.region.clone()),
                    },
                )?;
                config.resource(
                    "aws_instance",
                    "example",
                    &AwsInstanceBlock {
                        ami: Literal(spec.ami.clone()),
                        instance_type: Literal(spec.instance_type.clone()),
                        tags: AwsTags {
                            name: Literal(spec.name.clone()),
                        },
                    },
                )?;
            }
            Self::OpenStack(spec) => {
                config.require_provider(
                    "openstack",
                    "terraform-provider-openstack/openstack",
                    None,
                );
                config.provider(
                    "openstack",
                    &OpenStackProviderBlock {
                        auth_url: Literal(spec.auth_url.clone()),
                        user_name: Literal(spec.username.clone()),
                        password: &spec.password,
                        tenant_name: Literal(spec.tenant_name.clone()),
                    },
                )?;
                config.resource(
                    "openstack_compute_instance_v2",
                    "example",
                    &OpenStackComputeBlock {
                        name: Literal(spec.instance_name.clone()),
                        flavor_id: Literal(spec.flavor.clone()),
                        image_id: Literal(spec.image.clone()),
                    },
                )?;
            }
            Self::Vsphere(spec) => {
                config.require_provider("vsphere", "hashicorp/vsphere", None);
                config.provider(
                    "vsphere",
                    &VsphereProviderBlock {
                        user: Literal(spec.username.clone()),
                        password: &spec.password,
                        vsphere_server: Literal(spec.server.clone()),
                        allow_unverified_ssl: true,
                    },
                )?;
                config.data(
                    "vsphere_datacenter",
                    "dc",
                    &VsphereDatacenterBlock {
                        name: Literal(spec.datacenter.clone()),
                    },
                )?;
                config.data(
                    "vsphere_folder",
                    "vm_folder",
                    &VsphereFolderBlock {
                        path: Literal(spec.folder.clone()),
                    },
                )?;
                config.resource(
                    "vsphere_virtual_machine",
                    "vm",
                    &VsphereVmBlock {
                        name: Literal(spec.vm_name.clone()),
                        resource_pool_id: Literal(spec.resource_pool.clone()),
                        folder: Expr::reference("data.vsphere_folder.vm_folder.path"),
                        clone: VsphereClone {
                            template_uuid: Literal(spec.template.clone()),
                        },
                    },
                )?;
            }
        }
        Ok(config)
    }
}
