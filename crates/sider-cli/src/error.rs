//! CLI error type and exit codes.

use crate::tool::ToolError;
use sider_client::ClientError;
use sider_digest::DigestError;
use thiserror::Error;

/// Remediation shown when the external copy executable is missing.
pub const COPY_TOOL_HELP: &str = "This utility requires the sider-copy executable\n\
from the sider-copy gem on https://rubygems.org\n\
To install it, run `gem install sider-copy`.";

/// Exit code for a missing external executable, as shells report it.
pub const EXIT_TOOL_MISSING: u8 = 127;
/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Errors surfaced to the operator.
#[derive(Error, Debug)]
pub enum CliError {
    /// The server could not be reached.
    #[error("{0}")]
    Connection(#[from] ClientError),
    /// The dataset could not be read consistently.
    #[error("digest aborted: {0}")]
    Digest(#[from] DigestError),
    /// The external copy executable is not installed.
    #[error("'{program}' not found.\n{}", COPY_TOOL_HELP)]
    ToolMissing {
        /// Program that was looked up.
        program: String,
    },
    /// The external copy executable reported failure.
    #[error("copy failed: {0}")]
    CopyFailed(#[source] ToolError),
    /// Terminal or output I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON rendering failed.
    #[error("output error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ToolMissing { .. } => EXIT_TOOL_MISSING,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<ToolError> for CliError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound { program } => CliError::ToolMissing { program },
            other => CliError::CopyFailed(other),
        }
    }
}
