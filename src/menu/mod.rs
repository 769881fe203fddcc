//! Interactive numbered menu

pub mod prompts;

#[cfg(feature = "menu")]
pub mod interactive;

pub use prompts::{parse_selection, run_menu, Prompter};

#[cfg(feature = "menu")]
pub use interactive::{run_interactive, LinePrompter};

#[cfg(not(feature = "menu"))]
pub fn run_interactive<V, I>(
    _manager: &crate::workspace::WorkspaceManager<V, I>,
) -> crate::error::Result<crate::output::Outcome> {
    Err(crate::error::TerraworkError::ConfigError(
        "Interactive menu not enabled. Rebuild with --features menu".to_string(),
    ))
}
