//! Blight headless client binary.
//!
//! Loads content, builds the runtime and plays one scripted session.
//!
//! ```bash
//! BLIGHT_SEED=7 BLIGHT_DURATION_SECS=300 RUST_LOG=client=debug cargo run -p blight-client
//! ```

use anyhow::{Context, Result};
use blight_client::{Client, ClientConfig};
use game_content::ContentFactory;
use runtime::Runtime;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir.clone()),
        None => ContentFactory::bundled(),
    };
    tracing::info!("Loading content from {}", content.data_dir().display());

    let runtime = Runtime::builder()
        .game_config(content.load_config()?)
        .catalog(content.load_catalog()?)
        .enemies(content.load_enemies()?)
        .seed(config.seed)
        .build()
        .context("failed to build runtime")?;

    let summary = Client::builder().runtime(runtime).config(config).build()?.run()?;
    println!(
        "{:?} after {} ({} ticks): level {}, {} kills, {} spawned",
        summary.end, summary.elapsed, summary.ticks, summary.level, summary.kills, summary.spawned
    );
    Ok(())
}
