use serde::Deserialize;
use std::fmt;

/// A GitHub repository identified by its owner and name.
#[derive(Debug, Clone, PartialEq)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Represents a GitHub release asset
#[derive(Deserialize, Debug, PartialEq, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Represents a GitHub release
#[derive(Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}
