use anyhow::Result;
use corefetch::fetch;
use corefetch::runtime::RealRuntime;

/// corefetch - fetch the v2ray-core release matching this machine.
///
/// Looks up the latest published release of v2fly/v2ray-core, resolves the
/// asset named for the host OS and architecture, downloads it into
/// ./v2ray-core/ and unpacks it there. Takes no arguments.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let runtime = RealRuntime;
    let archive = fetch::fetch_core(runtime, None, None).await?;
    println!("Fetched {}", archive.display());
    Ok(())
}
