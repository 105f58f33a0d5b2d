mod zip;

use crate::runtime::Runtime;
use anyhow::Result;
use std::path::Path;

pub use zip::ZipExtractor;

/// Trait for format-specific archive extractors
#[cfg_attr(test, mockall::automock)]
pub trait Extractor: Send + Sync {
    /// Check if this extractor can handle the given archive format
    fn can_handle(&self, archive_path: &Path) -> bool;

    /// Unpack the archive into the specified directory
    fn extract<R: Runtime + 'static>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
    ) -> Result<()>;
}
