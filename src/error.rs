//! Error types for Terrawork

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerraworkError {
    #[error("Parse error in {}: {reason}", path.display())]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid port mapping '{token}': {reason}")]
    InvalidPort { token: String, reason: String },

    #[error("Invalid name '{0}': use letters, digits, '_', '.' or '-', starting with a letter or digit")]
    InvalidName(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Nothing provisioned at {}", .0.display())]
    NotProvisioned(PathBuf),

    #[error("Terraform {step} failed (exit status {status}):\n{stderr}")]
    ProvisionerFailed {
        step: String,
        status: i32,
        stderr: String,
    },

    #[error("Docker {action} failed for '{target}': {stderr}")]
    RuntimeFailed {
        action: String,
        target: String,
        stderr: String,
    },

    #[error("Could not run '{tool}': {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TerraworkError>;
