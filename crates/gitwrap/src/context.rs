//! Explicit per-command configuration.
//!
//! The knobs that would otherwise live as process-wide mutable globals
//! (binary name, metadata directory name, verbose tracing) are carried
//! here and handed to each command at construction.

use std::ffi::OsStr;

/// Default binary name.
pub const DEFAULT_BIN: &str = "git";

/// Default repository metadata directory name.
pub const DEFAULT_GIT_DIR: &str = ".git";

/// Environment variable that enables verbose command tracing.
pub const VERBOSE_ENV: &str = "GITWRAP_VERBOSE";

/// Configuration for building and tracing commands.
#[derive(Debug, Clone)]
pub struct GitContext {
    /// Name or path of the binary to invoke.
    pub bin: String,
    /// Name of the repo metadata directory to look for.
    pub git_dir_name: String,
    /// Print the rendered command line to stderr before executing.
    pub verbose: bool,
}

impl Default for GitContext {
    fn default() -> Self {
        Self {
            bin: DEFAULT_BIN.to_string(),
            git_dir_name: DEFAULT_GIT_DIR.to_string(),
            verbose: false,
        }
    }
}

impl GitContext {
    /// Defaults, with the verbose flag taken from [`VERBOSE_ENV`].
    pub fn from_env() -> Self {
        Self {
            verbose: verbose_from(std::env::var_os(VERBOSE_ENV).as_deref()),
            ..Self::default()
        }
    }

    /// Use a different binary.
    #[must_use]
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    /// Use a different metadata directory name.
    #[must_use]
    pub fn with_git_dir_name(mut self, name: impl Into<String>) -> Self {
        self.git_dir_name = name.into();
        self
    }

    /// Toggle verbose command tracing.
    #[must_use]
    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }
}

/// Interpret an environment value as a verbose toggle. Unset, empty and
/// `"0"` mean off.
fn verbose_from(value: Option<&OsStr>) -> bool {
    value.is_some_and(|v| !v.is_empty() && v != "0")
}
