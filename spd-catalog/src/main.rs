//! spd-catalog - catalog coverage diagnostics
//!
//! Console tool for operators: fetches the storage listing, rebuilds the
//! catalog index, pulls the space records from the dashboard API, resolves
//! every space through the tiered lookup, and reports which spaces have
//! audio, through which tier, and where a missing recording was expected to
//! land in storage.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spd_catalog::duration::estimate_total;
use spd_catalog::{CatalogConfig, CatalogService, HttpListingProvider, Resolver};
use spd_common::api::SpaceRecord;
use spd_common::human_time::format_duration_secs;
use spd_common::DashboardConfig;

/// Command-line arguments for spd-catalog
#[derive(Parser, Debug)]
#[command(name = "spd-catalog")]
#[command(about = "Catalog coverage diagnostics for the Spaces dashboard")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, env = "SPD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the storage-listing endpoint
    #[arg(long, env = "SPD_LISTING_URL")]
    listing_url: Option<String>,

    /// Override the spaces API endpoint
    #[arg(long, env = "SPD_SPACES_API_URL")]
    spaces_api_url: Option<String>,

    /// Diagnose at most this many spaces (0 = all)
    #[arg(long, default_value = "0")]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spd_catalog=info,spd_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = DashboardConfig::resolve(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(url) = args.listing_url {
        config.listing_url = url;
    }
    if let Some(url) = args.spaces_api_url {
        config.spaces_api_url = url;
    }

    info!("Starting spd-catalog diagnostics");
    info!("Listing endpoint: {}", config.listing_url);
    info!("Spaces endpoint: {}", config.spaces_api_url);
    info!("Storage base: {}", config.storage_base_url);

    let provider = HttpListingProvider::new(&config.listing_url, config.http_timeout_secs)
        .context("Failed to build listing client")?;
    let service = CatalogService::new(Arc::new(provider), CatalogConfig::from(&config));

    let stats = service
        .rebuild()
        .await
        .context("Failed to rebuild catalog from storage listing")?;
    info!(
        spaces_with_audio = stats.spaces_with_audio,
        audio_files = stats.audio_files,
        spaces_with_transcript = stats.spaces_with_transcript,
        skipped = stats.skipped_objects,
        "Catalog ready"
    );

    let mut spaces = fetch_spaces(&config)
        .await
        .context("Failed to fetch space records")?;
    if args.limit > 0 && spaces.len() > args.limit {
        spaces.truncate(args.limit);
    }
    info!(count = spaces.len(), "Diagnosing spaces");

    let snapshot = service.snapshot().await;
    let resolver = Resolver::new(&snapshot, service.config());

    let mut with_audio = 0usize;
    let mut with_transcript = 0usize;
    let mut total_seconds = 0f64;
    let mut total_partial = false;

    for space in &spaces {
        let host = space.host.as_deref();
        let created_at = space.created_at.as_deref();

        let transcript = resolver.resolve_transcript(&space.id, host, created_at);
        if transcript.is_some() {
            with_transcript += 1;
        }

        match resolver.resolve_audio(&space.id, host, created_at) {
            Some(lookup) => {
                with_audio += 1;
                let total = estimate_total(&lookup.assets, config.assumed_bitrate_kbps);
                total_seconds += total.seconds;
                total_partial |= total.partial;
                info!(
                    id = %space.id,
                    tier = lookup.tier.as_str(),
                    files = lookup.assets.len(),
                    duration = %mark_partial(format_duration_secs(total.seconds), total.partial),
                    transcript = transcript.is_some(),
                    "Audio found"
                );
            }
            None => {
                // Show the operator where the uploader was expected to put it
                let expected = resolver.predict_storage_path(
                    &space.id,
                    host,
                    created_at,
                    &config.audio_extensions[0],
                );
                warn!(id = %space.id, expected = %expected, "No audio found");
            }
        }
    }

    info!(
        with_audio,
        without_audio = spaces.len() - with_audio,
        with_transcript,
        total_duration = %mark_partial(format_duration_secs(total_seconds), total_partial),
        "Coverage summary"
    );

    Ok(())
}

/// Fetch the space records from the dashboard API
async fn fetch_spaces(config: &DashboardConfig) -> Result<Vec<SpaceRecord>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("spd-catalog/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let spaces: Vec<SpaceRecord> = client
        .get(&config.spaces_api_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(spaces)
}

/// Suffix incomplete aggregates so they read as a lower bound
fn mark_partial(formatted: String, partial: bool) -> String {
    if partial {
        format!("{}+", formatted)
    } else {
        formatted
    }
}
