//! Structured Terraform configuration
//!
//! Configuration is emitted in Terraform's JSON syntax (`main.tf.json`)
//! from typed values rather than by pasting user input into HCL text.
//! Every user-supplied string goes through [`Literal`], which escapes the
//! template sequences Terraform would otherwise interpolate.

pub mod documents;
pub mod ports;

pub use documents::{
    AwsInstance, DockerContainer, DockerProvider, InfraKind, InstanceSpec, OpenStackInstance,
    Secret, VsphereInstance,
};
pub use ports::{parse_port_list, PortMapping};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::common::write_atomic;
use crate::error::{Result, TerraworkError};

/// File name Terraform picks up in each working directory
pub const CONFIG_FILE: &str = "main.tf.json";

/// Escape `${` and `%{` so Terraform treats the text literally
pub fn escape_template(raw: &str) -> String {
    raw.replace("${", "$${").replace("%{", "%%{")
}

/// A user-supplied string that must reach Terraform verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(pub String);

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&escape_template(&self.0))
    }
}

/// A reference to another object's attribute, e.g. `docker_image.example.name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr(pub String);

impl Expr {
    pub fn reference(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("${{{}}}", self.0))
    }
}

#[derive(Debug, Clone, Serialize)]
struct RequiredProvider {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct SettingsBlock {
    required_providers: BTreeMap<String, RequiredProvider>,
}

type BlockMap = BTreeMap<String, BTreeMap<String, Value>>;

/// A whole Terraform module, built block by block
#[derive(Debug, Clone, Default, Serialize)]
pub struct TerraformConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    terraform: Option<SettingsBlock>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    provider: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    data: BlockMap,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    resource: BlockMap,
}

impl TerraformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a provider in `terraform.required_providers`
    pub fn require_provider(&mut self, name: &str, source: &str, version: Option<&str>) -> &mut Self {
        self.terraform
            .get_or_insert_with(SettingsBlock::default)
            .required_providers
            .insert(
                name.to_string(),
                RequiredProvider {
                    source: source.to_string(),
                    version: version.map(str::to_string),
                },
            );
        self
    }

    pub fn provider<T: Serialize>(&mut self, name: &str, body: &T) -> Result<&mut Self> {
        let value = to_block(body)?;
        self.provider.insert(name.to_string(), value);
        Ok(self)
    }

    pub fn data<T: Serialize>(&mut self, kind: &str, name: &str, body: &T) -> Result<&mut Self> {
        let value = to_block(body)?;
        self.data
            .entry(kind.to_string())
            .or_default()
            .insert(name.to_string(), value);
        Ok(self)
    }

    pub fn resource<T: Serialize>(&mut self, kind: &str, name: &str, body: &T) -> Result<&mut Self> {
        let value = to_block(body)?;
        self.resource
            .entry(kind.to_string())
            .or_default()
            .insert(name.to_string(), value);
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TerraworkError::ConfigError(format!("cannot encode Terraform config: {}", e)))
    }

    /// Write `main.tf.json` into `dir`, creating the directory if needed
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        let mut body = self.to_json()?;
        body.push('\n');
        write_atomic(&path, body.as_bytes())?;
        Ok(path)
    }
}

fn to_block<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| TerraworkError::ConfigError(format!("cannot encode Terraform block: {}", e)))
}
