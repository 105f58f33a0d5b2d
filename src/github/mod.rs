mod client;
mod types;

pub use client::{GetLatestRelease, GitHub};
pub use types::{GitHubRepo, Release, ReleaseAsset};

#[cfg(test)]
pub use client::MockGetLatestRelease;
