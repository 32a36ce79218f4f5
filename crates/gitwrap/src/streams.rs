//! Stream redirection targets for child processes.

use std::fs::File;
use std::io;
use std::process::Stdio;

/// Where a child stream is attached.
///
/// `Inherit` hands the child the parent's own handle directly, with no
/// piping or buffering; the caller keeps ownership of any `File` passed
/// in and is responsible for its lifetime.
#[derive(Debug, Default)]
pub enum StreamTarget {
    /// Attach the parent's corresponding standard stream.
    #[default]
    Inherit,
    /// Discard output (or for stdin, read EOF immediately).
    Null,
    /// Redirect to an open file handle.
    File(File),
}

impl StreamTarget {
    /// Build a `Stdio` for process setup. File handles are duplicated so
    /// the target stays usable across runs.
    pub(crate) fn to_stdio(&self) -> io::Result<Stdio> {
        Ok(match self {
            Self::Inherit => Stdio::inherit(),
            Self::Null => Stdio::null(),
            Self::File(f) => Stdio::from(f.try_clone()?),
        })
    }
}

impl From<File> for StreamTarget {
    fn from(f: File) -> Self {
        Self::File(f)
    }
}
