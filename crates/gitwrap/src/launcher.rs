//! Execution strategy selection.

use std::sync::OnceLock;

use crate::platform::{self, HostPlatform, PlatformProbe};

/// How [`GitCommand::run`](crate::GitCommand::run) executes the command.
///
/// Windows has no exec-family call and exec is unreliable under WSL, so
/// both fall back to spawn-and-wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launcher {
    /// POSIX exec: replace the current process image. Does not return on
    /// success.
    ReplaceImage,
    /// Spawn a child and block until it exits.
    SpawnWait,
}

static DETECTED: OnceLock<Launcher> = OnceLock::new();

impl Launcher {
    /// The strategy for the host platform, memoized after the first call.
    pub fn detect() -> Self {
        *DETECTED.get_or_init(|| Self::probe(&HostPlatform))
    }

    /// Strategy selection against an explicit probe.
    pub fn probe(p: &dyn PlatformProbe) -> Self {
        if p.is_windows() || platform::is_wsl(p) {
            Self::SpawnWait
        } else {
            Self::ReplaceImage
        }
    }
}
