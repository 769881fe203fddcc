//! Terminal prompter backed by rustyline

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::prompts::{run_menu, Prompter};
use crate::error::{Result, TerraworkError};
use crate::inventory::ContainerInventory;
use crate::output::Outcome;
use crate::provisioner::Provisioner;
use crate::workspace::WorkspaceManager;

pub struct LinePrompter {
    editor: DefaultEditor,
}

impl LinePrompter {
    pub fn new() -> Result<Self> {
        let editor =
            DefaultEditor::new().map_err(|e| TerraworkError::ConfigError(e.to_string()))?;
        Ok(Self { editor })
    }
}

impl Prompter for LinePrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line.trim().to_string()),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(TerraworkError::Cancelled)
            }
            Err(ReadlineError::Io(e)) => Err(TerraworkError::IoError(e)),
            Err(e) => Err(TerraworkError::ConfigError(e.to_string())),
        }
    }

    fn say(&mut self, text: &str) {
        println!("{}\n", text);
    }
}

pub fn run_interactive<V, I>(manager: &WorkspaceManager<V, I>) -> Result<Outcome>
where
    V: Provisioner,
    I: ContainerInventory,
{
    let mut prompter = LinePrompter::new()?;
    run_menu(&mut prompter, manager)
}
