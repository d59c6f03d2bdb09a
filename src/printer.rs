use std::path::Path;
use std::process::Command;

use crate::error::{LabelError, Result};

/// Sends finished images to a label printer through an external program
/// invoked as `program --image <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintCommand {
    program: String,
}

impl Default for PrintCommand {
    fn default() -> Self {
        PrintCommand::new("ptouch-print")
    }
}

impl PrintCommand {
    /// Uses `program` as the print utility.
    pub fn new(program: impl Into<String>) -> Self {
        PrintCommand { program: program.into() }
    }

    /// Name of the print utility.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Prints the image at `path`, blocking until the utility exits.
    ///
    /// # Errors
    /// Returns [`LabelError::ExternalTool`] when the utility cannot be
    /// started or exits unsuccessfully.
    pub fn print(&self, path: &Path) -> Result<()> {
        tracing::debug!(program = %self.program, path = %path.display(), "invoking printer");
        let status = Command::new(&self.program)
            .arg("--image")
            .arg(path)
            .status()
            .map_err(|e| LabelError::external(&self.program, e))?;

        if !status.success() {
            return Err(LabelError::external(&self.program, status));
        }
        Ok(())
    }
}
