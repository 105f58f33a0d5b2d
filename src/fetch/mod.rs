//! The fetch pipeline: identify the platform, resolve the matching release
//! asset, stream it to disk, unpack it.

pub mod config;

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use crate::archive::Extractor;
use crate::asset::{AssetPicker, PlatformAssetPicker};
use crate::download::download_asset;
use crate::error::FetchError;
use crate::github::GetLatestRelease;
use crate::runtime::Runtime;

pub use config::Config;

/// Fetch the core release matching this machine into `target_dir`
/// (`./v2ray-core` by default). Returns the path of the downloaded archive.
#[tracing::instrument(skip(runtime, target_dir, api_url))]
pub async fn fetch_core<R: Runtime + 'static>(
    runtime: R,
    target_dir: Option<PathBuf>,
    api_url: Option<String>,
) -> Result<PathBuf> {
    let config = Config::new(runtime, target_dir, api_url)?;
    run(config).await
}

/// Run the pipeline with an explicit configuration.
#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime + 'static, G: GetLatestRelease, E: Extractor>(
    config: Config<R, G, E>,
) -> Result<PathBuf> {
    let release = config
        .github
        .latest_release(&config.repo)
        .await?
        .ok_or(FetchError::ReleaseUnavailable)?;

    info!("Latest release of {} is {}", config.repo, release.tag_name);

    let picker = PlatformAssetPicker::new(config.platform.clone());
    let asset = picker
        .pick(&release.assets)
        .ok_or_else(|| FetchError::NoMatchingAsset {
            os: config.platform.os.clone(),
            arch: config.platform.arch.clone(),
        })?;

    info!("Resolved asset {} for {}", asset.name, release.tag_name);

    let archive_path = config.target_dir.join(&asset.name);
    download_asset(
        &config.runtime,
        &config.client,
        &asset.browser_download_url,
        &archive_path,
    )
    .await
    .with_context(|| format!("Failed to download asset: {}", asset.name))?;

    config
        .extractor
        .extract(&config.runtime, &archive_path, &config.target_dir)
        .with_context(|| format!("Failed to unpack {:?}", archive_path))?;

    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MockExtractor;
    use crate::github::{GitHubRepo, MockGetLatestRelease, Release, ReleaseAsset};
    use crate::platform::Platform;
    use crate::runtime::MockRuntime;
    use reqwest::Client;
    use std::path::PathBuf;

    fn test_config<G: GetLatestRelease, E: Extractor>(
        github: G,
        extractor: E,
    ) -> Config<MockRuntime, G, E> {
        test_config_with(MockRuntime::new(), github, extractor)
    }

    fn test_config_with<G: GetLatestRelease, E: Extractor>(
        runtime: MockRuntime,
        github: G,
        extractor: E,
    ) -> Config<MockRuntime, G, E> {
        Config {
            runtime,
            github,
            client: Client::new(),
            extractor,
            platform: Platform {
                os: "macos".into(),
                arch: "arm64".into(),
            },
            repo: GitHubRepo {
                owner: "v2fly".into(),
                repo: "v2ray-core".into(),
            },
            target_dir: PathBuf::from("/tmp/core"),
        }
    }

    #[tokio::test]
    async fn test_run_reports_release_unavailable() {
        // Non-success release query surfaced as an absent result upstream;
        // the pipeline turns it into an explicit reported error.
        let mut github = MockGetLatestRelease::new();
        github.expect_latest_release().returning(|_| Ok(None));

        // Strict mocks: nothing may touch the filesystem or the extractor
        let result = run(test_config(github, MockExtractor::new())).await;

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FetchError>(),
            Some(&FetchError::ReleaseUnavailable)
        );
    }

    #[tokio::test]
    async fn test_run_reports_no_matching_asset() {
        let mut github = MockGetLatestRelease::new();
        github.expect_latest_release().returning(|_| {
            Ok(Some(Release {
                tag_name: "v5.16.1".into(),
                assets: vec![
                    ReleaseAsset {
                        name: "v2ray-windows-x86_64.zip".into(),
                        browser_download_url: "https://example.com/win".into(),
                    },
                    ReleaseAsset {
                        name: "v2ray-macos-arm64.tar.gz".into(),
                        browser_download_url: "https://example.com/tar".into(),
                    },
                ],
            }))
        });

        let result = run(test_config(github, MockExtractor::new())).await;

        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FetchError>(),
            Some(&FetchError::NoMatchingAsset {
                os: "macos".into(),
                arch: "arm64".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_run_downloads_and_extracts_resolved_asset() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let download_mock = server
            .mock("GET", "/v2ray-macos-arm64.zip")
            .with_status(200)
            .with_body("zip bytes")
            .create_async()
            .await;

        let asset_url = format!("{}/v2ray-macos-arm64.zip", url);
        let mut github = MockGetLatestRelease::new();
        github.expect_latest_release().returning(move |_| {
            Ok(Some(Release {
                tag_name: "v5.16.1".into(),
                assets: vec![ReleaseAsset {
                    name: "v2ray-macos-arm64.zip".into(),
                    browser_download_url: asset_url.clone(),
                }],
            }))
        });

        let mut runtime = MockRuntime::new();
        runtime.expect_create_dir_all().returning(|_| Ok(()));
        runtime
            .expect_create_file()
            .returning(|_| Ok(Box::new(std::io::sink())));

        let mut extractor = MockExtractor::new();
        extractor
            .expect_extract()
            .times(1)
            .returning(|_: &MockRuntime, _, _| Ok(()));

        let archive = run(test_config_with(runtime, github, extractor))
            .await
            .unwrap();

        download_mock.assert_async().await;
        assert_eq!(archive, PathBuf::from("/tmp/core/v2ray-macos-arm64.zip"));
    }

    #[tokio::test]
    async fn test_run_download_failure_propagates() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let download_mock = server
            .mock("GET", "/v2ray-macos-arm64.zip")
            .with_status(500)
            .create_async()
            .await;

        let asset_url = format!("{}/v2ray-macos-arm64.zip", url);
        let mut github = MockGetLatestRelease::new();
        github.expect_latest_release().returning(move |_| {
            Ok(Some(Release {
                tag_name: "v5.16.1".into(),
                assets: vec![ReleaseAsset {
                    name: "v2ray-macos-arm64.zip".into(),
                    browser_download_url: asset_url.clone(),
                }],
            }))
        });

        let mut runtime = MockRuntime::new();
        runtime.expect_create_dir_all().returning(|_| Ok(()));

        // Extractor must not run when the download fails
        let result = run(test_config_with(runtime, github, MockExtractor::new())).await;

        download_mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to download asset"));
    }
}
