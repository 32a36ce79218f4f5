//! Builder-style wrapper for running the `git` command-line tool.
//!
//! Construct a [`GitCommand`], chain configuration calls, then finish
//! with exactly one execution method:
//!
//! ```no_run
//! use gitwrap::GitCommand;
//!
//! let log = GitCommand::new(["log", "--oneline", "-n", "5"]).output()?;
//! # Ok::<(), gitwrap::GitError>(())
//! ```
//!
//! [`GitCommand::run`] picks between POSIX process-image replacement and
//! spawn-and-wait depending on what the platform supports (Windows and
//! WSL only get the latter).

pub mod command;
pub mod context;
pub mod errors;
pub mod launcher;
pub mod platform;
pub mod streams;

pub use command::GitCommand;
pub use context::GitContext;
pub use errors::GitError;
pub use launcher::Launcher;
pub use streams::StreamTarget;
