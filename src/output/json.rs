//! JSON output formatting

use crate::output::formatter::Outcome;
use serde_json::{json, Value};

pub fn format_json(outcome: &Outcome) -> String {
    let data: Value = match outcome {
        Outcome::Workspace(report) => serde_json::to_value(report).unwrap_or(json!(null)),
        Outcome::Provisioned(report) => serde_json::to_value(report).unwrap_or(json!(null)),
        Outcome::TornDown(report) => serde_json::to_value(report).unwrap_or(json!(null)),
        Outcome::Destroyed(report) => serde_json::to_value(report).unwrap_or(json!(null)),
        Outcome::Workspaces(registry) => {
            json!({ "workspaces": serde_json::to_value(registry).unwrap_or(json!(null)) })
        }
        Outcome::Containers(names) => json!({ "containers": names }),
        Outcome::Instance(report) => serde_json::to_value(report).unwrap_or(json!(null)),
        Outcome::InstanceTornDown(report) => serde_json::to_value(report).unwrap_or(json!(null)),
        Outcome::Message(s) => json!({ "message": s }),
    };

    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
