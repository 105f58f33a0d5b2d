//! Streaming retrieval of a resolved asset with progress reporting.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io::Write;
use std::path::Path;

use crate::runtime::Runtime;

/// Download `url` into `dest`, creating any missing parent directories first.
///
/// The body is written chunk-by-chunk as it arrives, with cumulative progress
/// reported against the response's `content-length` (unknown when the header
/// is absent). The file is created in truncating binary mode, so fetching the
/// same asset twice overwrites in place. Returns the number of bytes written.
///
/// There is no retry and no integrity check: success means every chunk was
/// written without a transport fault. A fault mid-stream propagates and leaves
/// the partial file on disk.
#[tracing::instrument(skip(runtime, client))]
pub async fn download_asset<R: Runtime>(
    runtime: &R,
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        runtime
            .create_dir_all(parent)
            .with_context(|| format!("Failed to create target directory at {:?}", parent))?;
    }

    info!("Downloading {} to {:?}...", url, dest);

    let mut response = client
        .get(url)
        .send()
        .await
        .context("Failed to start download request")?
        .error_for_status()
        .context("Download request was refused")?;

    let total = response.content_length().unwrap_or(0);
    let progress = progress_bar(total, dest);

    let mut writer = runtime
        .create_file(dest)
        .with_context(|| format!("Failed to create file at {:?}", dest))?;
    let mut downloaded: u64 = 0;

    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read chunk from download stream")?
    {
        writer
            .write_all(&chunk)
            .context("Failed to write chunk to file")?;
        downloaded += chunk.len() as u64;
        progress.set_position(downloaded);
    }

    progress.finish();
    debug!(
        "Downloaded {:.2} MB",
        downloaded as f64 / (1024.0 * 1024.0)
    );

    Ok(downloaded)
}

/// A byte-count bar when the total is known, a byte spinner otherwise.
fn progress_bar(total: u64, dest: &Path) -> ProgressBar {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let pb = if total > 0 {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        pb
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner:.green} {bytes}")
                .expect("Invalid spinner template"),
        );
        pb
    };
    pb.set_message(name);
    pb
}
