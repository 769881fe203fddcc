//! `external:internal` port mapping tokens

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerraworkError};

/// One published port: host side first, container side second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub external: u16,
    pub internal: u16,
}

impl PortMapping {
    pub fn new(external: u16, internal: u16) -> Self {
        Self { external, internal }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.external, self.internal)
    }
}

impl FromStr for PortMapping {
    type Err = TerraworkError;

    fn from_str(token: &str) -> Result<Self> {
        let invalid = |reason: &str| TerraworkError::InvalidPort {
            token: token.to_string(),
            reason: reason.to_string(),
        };

        let (external, internal) = token
            .split_once(':')
            .ok_or_else(|| invalid("expected external:internal"))?;
        if internal.contains(':') {
            return Err(invalid("expected exactly one ':'"));
        }

        Ok(Self {
            external: parse_port(external.trim()).map_err(|r| invalid(&r))?,
            internal: parse_port(internal.trim()).map_err(|r| invalid(&r))?,
        })
    }
}

fn parse_port(part: &str) -> std::result::Result<u16, String> {
    if part.is_empty() {
        return Err("missing port number".to_string());
    }
    match part.parse::<u16>() {
        Ok(0) => Err("port 0 is not allowed".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!("'{}' is not a port number", part)),
    }
}

/// Parse a comma-separated list such as `"8080:80, 443:443"`.
/// Blank items are skipped; any malformed item fails the whole list.
pub fn parse_port_list(input: &str) -> Result<Vec<PortMapping>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(PortMapping::from_str)
        .collect()
}
