use crate::github::ReleaseAsset;
use crate::platform::Platform;

/// Suffix a downloadable core archive must carry.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Trait for selecting an asset from a list of available assets
pub trait AssetPicker: Send + Sync {
    /// Pick the most appropriate asset from the given list
    ///
    /// Returns `None` if no suitable asset is found
    fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset>;
}

/// Picks the first asset named for the given platform.
///
/// The OS label is matched case-insensitively, the machine label exactly as
/// the host reports it, and the name must end with [`ARCHIVE_SUFFIX`]. Scan
/// order is list order; the first hit wins.
pub struct PlatformAssetPicker {
    platform: Platform,
}

impl PlatformAssetPicker {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    fn matches(&self, name: &str) -> bool {
        name.to_lowercase()
            .contains(&self.platform.os.to_lowercase())
            && name.contains(&self.platform.arch)
            && name.ends_with(ARCHIVE_SUFFIX)
    }
}

impl AssetPicker for PlatformAssetPicker {
    fn pick<'a>(&self, assets: &'a [ReleaseAsset]) -> Option<&'a ReleaseAsset> {
        assets.iter().find(|a| self.matches(&a.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper function to create test assets from names
    fn make_assets(names: &[&str]) -> Vec<ReleaseAsset> {
        names
            .iter()
            .map(|name| ReleaseAsset {
                name: name.to_string(),
                browser_download_url: format!("https://example.com/{}", name),
            })
            .collect()
    }

    fn picker(os: &str, arch: &str) -> PlatformAssetPicker {
        PlatformAssetPicker::new(Platform {
            os: os.into(),
            arch: arch.into(),
        })
    }

    #[test]
    fn test_picks_matching_zip_over_other_platforms_and_formats() {
        // The .zip requirement rules out the tar.gz twin of the right asset
        let picker = picker("macos", "arm64");

        let assets = make_assets(&[
            "app-windows-x86_64.zip",
            "app-macos-arm64.zip",
            "app-macos-arm64.tar.gz",
        ]);

        let picked = picker.pick(&assets).unwrap();
        assert_eq!(picked.name, "app-macos-arm64.zip");
        assert_eq!(
            picked.browser_download_url,
            "https://example.com/app-macos-arm64.zip"
        );
    }

    #[test]
    fn test_first_match_in_list_order_wins() {
        let picker = picker("linux", "x86_64");

        let assets = make_assets(&[
            "first-linux-x86_64.zip",
            "second-linux-x86_64.zip",
        ]);

        let picked = picker.pick(&assets).unwrap();
        assert_eq!(picked.name, "first-linux-x86_64.zip");
    }

    #[test]
    fn test_os_label_match_is_case_insensitive() {
        let picker = picker("macos", "arm64");

        let assets = make_assets(&["App-MacOS-arm64.zip"]);

        assert!(picker.pick(&assets).is_some());
    }

    #[test]
    fn test_machine_label_match_is_case_sensitive() {
        let picker = picker("macos", "arm64");

        // "ARM64" does not contain "arm64" byte-for-byte
        let assets = make_assets(&["app-macos-ARM64.zip"]);

        assert!(picker.pick(&assets).is_none());
    }

    #[test]
    fn test_no_matching_asset() {
        let picker = picker("macos", "arm64");

        let assets = make_assets(&[
            "app-windows-x86_64.zip",
            "app-linux-x86_64.zip",
        ]);

        assert!(picker.pick(&assets).is_none());
    }

    #[test]
    fn test_empty_asset_list() {
        let picker = picker("macos", "arm64");
        assert!(picker.pick(&[]).is_none());
    }

    #[test]
    fn test_suffix_must_terminate_the_name() {
        let picker = picker("linux", "x86_64");

        // ".zip" appears mid-name only
        let assets = make_assets(&["app-linux-x86_64.zip.sha256"]);

        assert!(picker.pick(&assets).is_none());
    }
}
