use anyhow::Result;
use reqwest::Client;
use std::path::PathBuf;

use crate::{
    archive::{Extractor, ZipExtractor},
    github::{GetLatestRelease, GitHub, GitHubRepo},
    platform::{Platform, UnmappedSystem},
    runtime::Runtime,
};

/// Release coordinates of the core this tool retrieves.
pub const CORE_OWNER: &str = "v2fly";
pub const CORE_REPO: &str = "v2ray-core";

/// Where the archive lands, relative to the working directory.
pub const DEFAULT_TARGET_DIR: &str = "v2ray-core";

/// Everything the pipeline needs, resolved up front and passed explicitly.
pub struct Config<R: Runtime, G: GetLatestRelease, E: Extractor> {
    pub runtime: R,
    pub github: G,
    pub client: Client,
    pub extractor: E,
    pub platform: Platform,
    pub repo: GitHubRepo,
    pub target_dir: PathBuf,
}

impl<R: Runtime> Config<R, GitHub, ZipExtractor> {
    /// Build the default configuration: real GitHub API (or `api_url`), the
    /// fixed core repository, and the host platform identified under the
    /// reject-unmapped-systems policy.
    pub fn new(
        runtime: R,
        target_dir: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder().user_agent("corefetch").build()?;
        let github = GitHub::new(client.clone(), api_url);
        let platform = Platform::identify(UnmappedSystem::Reject)?;
        let target_dir = target_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_DIR));

        Ok(Self {
            runtime,
            github,
            client,
            extractor: ZipExtractor,
            platform,
            repo: GitHubRepo {
                owner: CORE_OWNER.to_string(),
                repo: CORE_REPO.to_string(),
            },
            target_dir,
        })
    }
}
