//! External executable runner.

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

/// Failure running an external executable.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable does not exist on `PATH` or at the given path.
    #[error("executable '{program}' not found")]
    NotFound {
        /// Program that was looked up.
        program: String,
    },
    /// The executable ran and reported failure.
    #[error("'{program}' failed with {status}")]
    Failed {
        /// Program that ran.
        program: String,
        /// Its exit status.
        status: ExitStatus,
    },
    /// The executable exists but could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that could not start.
        program: String,
        /// Underlying OS error.
        source: io::Error,
    },
}

/// An executable invoked with an argument vector, never through a shell.
///
/// Standard streams are inherited so the tool's own progress output reaches
/// the operator.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
}

impl ExternalTool {
    /// Wraps `program`, a bare name resolved on `PATH` or a path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs the program to completion.
    pub fn run<I, S>(&self, args: I) -> Result<(), ToolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = self.program.display().to_string();
        let mut command = Command::new(&self.program);
        command.args(args);
        debug!(?command, "running external tool");

        let status = command.status().map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound {
                program: program.clone(),
            },
            _ => ToolError::Spawn {
                program: program.clone(),
                source,
            },
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed { program, status })
        }
    }
}
