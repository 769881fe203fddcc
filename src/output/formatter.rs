//! Output formatting

use crate::output::human::format_human;
use crate::output::json::format_json;
use crate::registry::Registry;
use crate::workspace::{
    DestroyReport, EnsureReport, InstanceReport, InstanceTeardownReport, ProvisionReport,
    TeardownReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Anything a command can hand back for display
#[derive(Debug, Clone)]
pub enum Outcome {
    Workspace(EnsureReport),
    Provisioned(ProvisionReport),
    TornDown(TeardownReport),
    Destroyed(DestroyReport),
    Workspaces(Registry),
    Containers(Vec<String>),
    Instance(InstanceReport),
    InstanceTornDown(InstanceTeardownReport),
    Message(String),
}

pub fn format_output(outcome: &Outcome, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(outcome),
        OutputFormat::Json => format_json(outcome),
    }
}
