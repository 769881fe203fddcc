//! Human-readable output formatting

use crate::output::formatter::Outcome;

pub fn format_human(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Workspace(report) => {
            if report.created {
                format!("Workspace '{}' created.", report.workspace)
            } else {
                format!("Workspace '{}' already exists.", report.workspace)
            }
        }
        Outcome::Provisioned(report) => {
            let ports = if report.ports.is_empty() {
                "-".to_string()
            } else {
                report
                    .ports
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let mut output = format!(
                "Container Provisioned\n\
                 ---------------------\n\
                 Workspace: {}\n\
                 Container: {}\n\
                 Image:     {}\n\
                 Ports:     {}\n\
                 Directory: {}\n\
                 Duration:  {}s\n",
                report.workspace,
                report.container,
                report.image,
                ports,
                report.directory.display(),
                (report.finished_at - report.started_at).num_seconds()
            );
            if report.workspace_created {
                output.push_str(&format!("\nWorkspace '{}' created.", report.workspace));
            }
            if report.replaced_existing {
                output.push_str(&format!(
                    "\nReplaced an existing container named '{}'.",
                    report.container
                ));
            }
            if !report.recorded {
                output.push_str(&format!(
                    "\nContainer '{}' is already in the workspace.",
                    report.container
                ));
            }
            output.trim_end().to_string()
        }
        Outcome::TornDown(report) => {
            let mut output = format!(
                "Destroyed Terraform infrastructure for '{}' in workspace '{}'.",
                report.container, report.workspace
            );
            if !report.forgotten {
                output.push_str("\n(it was not listed in the workspace)");
            }
            output
        }
        Outcome::Destroyed(report) => {
            let mut output = format!("Container {} has been destroyed.", report.container);
            if !report.workspaces.is_empty() {
                output.push_str(&format!(
                    "\nRemoved from workspace(s): {}",
                    report.workspaces.join(", ")
                ));
            }
            output
        }
        Outcome::Workspaces(registry) => {
            if registry.is_empty() {
                return "No workspaces found".to_string();
            }
            let mut output = String::from("Workspaces\n----------\n");
            output.push_str(&format!("{:<20} {:>10}  {}\n", "NAME", "CONTAINERS", "NAMES"));
            output.push_str(&"-".repeat(52));
            output.push('\n');
            for (name, containers) in registry.workspaces() {
                output.push_str(&format!(
                    "{:<20} {:>10}  {}\n",
                    truncate(name, 20),
                    containers.len(),
                    containers.join(", ")
                ));
            }
            output.trim_end().to_string()
        }
        Outcome::Containers(names) => {
            if names.is_empty() {
                return "No containers found.".to_string();
            }
            let mut output = String::from("Available containers:\n");
            for (idx, name) in names.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", idx + 1, name));
            }
            output.trim_end().to_string()
        }
        Outcome::Instance(report) => {
            format!(
                "{} Provisioned\n\
                 {}\n\
                 Name:      {}\n\
                 Directory: {}\n\
                 Duration:  {}s",
                report.kind.label(),
                "-".repeat(report.kind.label().len() + 12),
                report.name,
                report.directory.display(),
                (report.finished_at - report.started_at).num_seconds()
            )
        }
        Outcome::InstanceTornDown(report) => format!(
            "Destroyed {} managed in {}.",
            report.kind.label(),
            report.directory.display()
        ),
        Outcome::Message(msg) => msg.clone(),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
