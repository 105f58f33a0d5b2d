//! Host platform identification.
//!
//! Produces the pair of labels that release asset names are matched against:
//! a normalized operating-system label and the raw machine label. Both are
//! computed once and passed explicitly through the pipeline.

use crate::error::FetchError;

/// Raw system name to normalized OS label.
const SYSTEM_LABELS: &[(&str, &str)] = &[
    ("Darwin", "macos"),
    ("Linux", "linux"),
    ("Windows", "windows"),
];

/// What to do when the raw system name is absent from [`SYSTEM_LABELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedSystem {
    /// Fail with [`FetchError::UnsupportedSystem`].
    #[default]
    Reject,
    /// Use the raw system name as the label.
    PassThrough,
}

/// Platform information for asset selection
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Identify the current host.
    ///
    /// The OS label goes through the normalization table; the machine label
    /// is reported as-is.
    pub fn identify(policy: UnmappedSystem) -> Result<Self, FetchError> {
        Ok(Self {
            os: normalize_system(&raw_system(), policy)?,
            arch: raw_machine(),
        })
    }
}

/// Look up the normalized label for a raw system name.
pub fn normalize_system(raw: &str, policy: UnmappedSystem) -> Result<String, FetchError> {
    match SYSTEM_LABELS.iter().find(|(name, _)| *name == raw) {
        Some((_, label)) => Ok((*label).to_string()),
        None => match policy {
            UnmappedSystem::PassThrough => Ok(raw.to_string()),
            UnmappedSystem::Reject => Err(FetchError::UnsupportedSystem(raw.to_string())),
        },
    }
}

/// The system name as a uname-style identifier.
fn raw_system() -> String {
    #[cfg(target_os = "macos")]
    {
        "Darwin".to_string()
    }
    #[cfg(target_os = "linux")]
    {
        "Linux".to_string()
    }
    #[cfg(target_os = "windows")]
    {
        "Windows".to_string()
    }
    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        std::env::consts::OS.to_string()
    }
}

/// The machine label as the host reports it. macOS calls its 64-bit ARM
/// "arm64" where Linux says "aarch64"; release assets are named accordingly.
fn raw_machine() -> String {
    #[cfg(target_arch = "x86_64")]
    {
        "x86_64".to_string()
    }
    #[cfg(all(target_arch = "aarch64", target_os = "macos"))]
    {
        "arm64".to_string()
    }
    #[cfg(all(target_arch = "aarch64", not(target_os = "macos")))]
    {
        "aarch64".to_string()
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        std::env::consts::ARCH.to_string()
    }
}
