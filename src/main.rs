use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;

use resourcesync::config::Config;
use resourcesync::core_api::{self, Extractor};
use resourcesync::feed::{ResourceSync, Walker};
use resourcesync::util::validate_target_url;

/// Breaks up verbose output between documents.
const SEGMENTATION: &str = "====================";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetType {
    /// A ResourceSync document (capability list, resource list, index, ...)
    Resourcesync,
    /// A CORE API article metadata endpoint
    Core,
}

#[derive(Parser, Debug)]
#[command(
    name = "rsprobe",
    version,
    about = "Visit a ResourceSync endpoint and evaluate the response"
)]
struct Args {
    /// Absolute URL of the document to probe
    #[arg(long, value_name = "URL", required_unless_present = "fastsync_file")]
    target: Option<String>,

    /// What the target points at
    #[arg(long, value_enum, default_value_t = TargetType::Resourcesync)]
    target_type: TargetType,

    /// Follow index entries until terminal lists are reached
    #[arg(long)]
    follow: bool,

    /// Maximum number of index levels to follow
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// API key for CORE metadata requests
    #[arg(long, env = "CORE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Print every document discovered
    #[arg(long)]
    verbose: bool,

    /// Config file (defaults to ~/.config/rsprobe/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Decode a local FastSync article JSON file and print it
    #[arg(long, value_name = "FILE", conflicts_with = "target")]
    fastsync_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = args.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    config.follow |= args.follow;
    config.verbose |= args.verbose;
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }
    tracing::debug!(?config, "Effective configuration");

    if let Some(file) = &args.fastsync_file {
        return print_fastsync_file(file);
    }

    let target = args
        .target
        .as_deref()
        .context("--target is required")?;
    let target = validate_target_url(target)
        .with_context(|| format!("This tool expects --target to be a valid, absolute URL, got {target:?}"))?;

    match args.target_type {
        TargetType::Resourcesync => probe_resourcesync(&config, target.as_str()).await,
        TargetType::Core => {
            let api_key = args
                .api_key
                .filter(|k| !k.is_empty())
                .map(SecretString::from)
                .or_else(|| config.core_api_key())
                .context("Target type 'core' requires an API key (--api-key, CORE_API_KEY or config)")?;
            probe_core(&config, target.as_str(), &api_key).await
        }
    }
}

async fn probe_resourcesync(config: &Config, target: &str) -> Result<()> {
    let fetcher = config
        .http_fetcher()
        .context("Failed to build HTTP client")?;
    let rs = ResourceSync::new(fetcher);
    let verbose = config.verbose;

    let summary = Walker::new(&rs)
        .follow(config.follow)
        .max_depth(config.max_depth)
        .walk(target, |url, feed| {
            if verbose {
                println!("{url}");
                println!("{feed}");
                println!("{SEGMENTATION}");
            }
        })
        .await
        .with_context(|| format!("Failed to process ResourceSync target {target}"))?;

    println!("Starting point: {}", summary.start);
    println!("Documents processed: {}", summary.visited.len());
    println!("Index links found: {}", summary.index_links);
    println!("Resource links found: {}", summary.resource_links);
    if summary.skipped > 0 {
        println!("Index links not followed: {}", summary.skipped);
    }
    if !summary.failures.is_empty() {
        println!("Failures: {}", summary.failures.len());
        for failure in &summary.failures {
            println!("  {} - {}", failure.url, failure.error);
        }
    }
    Ok(())
}

async fn probe_core(config: &Config, target: &str, api_key: &SecretString) -> Result<()> {
    let fetcher = config
        .http_fetcher()
        .context("Failed to build HTTP client")?;
    let article = Extractor::new(fetcher)
        .process(target, api_key.expose_secret())
        .await
        .with_context(|| format!("Failed to process CORE metadata from {target}"))?;
    println!("{article}");
    Ok(())
}

fn print_fastsync_file(path: &std::path::Path) -> Result<()> {
    let data = std::fs::read(path)
        .with_context(|| format!("Unable to read file: {}", path.display()))?;
    let article = core_api::extract_fastsync_article(&data).context("Unable to parse JSON")?;
    println!("{article}");
    Ok(())
}
