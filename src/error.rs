//! Explicit failure reasons for the fetch pipeline.

use std::fmt;

/// Conditions that stop the pipeline before a download begins.
///
/// "No release" and "no matching asset" are ordinary outcomes of the release
/// query and asset scan; they are carried as values and checked at every call
/// site rather than surfacing as an unchecked dereference.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The raw system name has no entry in the normalization table.
    UnsupportedSystem(String),
    /// The latest-release query answered with a non-success status.
    ReleaseUnavailable,
    /// No release asset names both the OS label and the machine label.
    NoMatchingAsset { os: String, arch: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::UnsupportedSystem(name) => {
                write!(f, "Unsupported system {:?}: no platform label is known for it", name)
            }
            FetchError::ReleaseUnavailable => {
                write!(f, "No release available: the latest-release query did not succeed")
            }
            FetchError::NoMatchingAsset { os, arch } => {
                write!(
                    f,
                    "No release asset matches {} / {} with a {} name",
                    os,
                    arch,
                    crate::asset::ARCHIVE_SUFFIX
                )
            }
        }
    }
}

impl std::error::Error for FetchError {}
