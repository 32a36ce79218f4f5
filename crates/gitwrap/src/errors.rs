//! Error types for subprocess execution.

/// Errors from running the wrapped binary.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The child ran but exited with a non-zero status.
    #[error("{command} failed{}{}",
        .exit_code.map_or_else(String::new, |c| format!(" with exit code {c}")),
        if .message.is_empty() { String::new() } else { format!(": {message}") })]
    CommandFailed {
        /// First argument token, identifying the subcommand.
        command: String,
        /// Captured child output, when the failing mode captured any.
        message: String,
        /// Exit code, absent when the child was killed by a signal.
        exit_code: Option<i32>,
    },

    /// Executable could not be resolved through PATH. Surfaced only from
    /// the process-replacement path.
    #[error("{name}: command not found")]
    NotFound {
        /// The executable name that failed to resolve.
        name: String,
    },

    /// I/O failure launching or waiting on the child.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitError {
    /// Get the exit code if this was a command failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
