//! Platform capability probing.
//!
//! Process-image replacement is unavailable on Windows and known to
//! misbehave under WSL, so strategy selection needs to recognize both.
//! WSL is identified by the vendor marker its kernels leave in
//! `/proc/version` (see Microsoft/WSL#423).

/// Marker string WSL kernels put in `/proc/version`. Matched
/// case-insensitively; WSL2 reports `microsoft-standard`.
const WSL_MARKER: &str = "microsoft";

/// Capability probe for execution-strategy selection.
///
/// Abstracted so tests can inject fake platforms; [`HostPlatform`] is the
/// real one.
pub trait PlatformProbe {
    /// Whether the target OS is Windows.
    fn is_windows(&self) -> bool;

    /// Contents of `/proc/version`, if readable.
    fn proc_version(&self) -> Option<String>;
}

/// Probe backed by the actual host.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformProbe for HostPlatform {
    fn is_windows(&self) -> bool {
        cfg!(windows)
    }

    fn proc_version(&self) -> Option<String> {
        std::fs::read_to_string("/proc/version").ok()
    }
}

/// Whether `/proc/version` contents identify a WSL kernel.
pub fn version_mentions_wsl(contents: &str) -> bool {
    contents.to_ascii_lowercase().contains(WSL_MARKER)
}

/// Whether the probed platform runs under WSL.
pub fn is_wsl(probe: &dyn PlatformProbe) -> bool {
    probe
        .proc_version()
        .is_some_and(|v| version_mentions_wsl(&v))
}
