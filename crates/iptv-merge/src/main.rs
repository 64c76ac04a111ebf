use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_merge::{
    config::Config,
    pipeline::Pipeline,
    sources::TracingSourceReporter,
    utils::StandardHttpClient,
};

#[derive(Parser)]
#[command(name = "iptv-merge")]
#[command(version)]
#[command(about = "Merge IPTV playlists from many sources into one template-ordered playlist")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Channel template file (overrides config file)
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// M3U output path (overrides config file)
    #[arg(long, value_name = "FILE")]
    m3u_output: Option<PathBuf>,

    /// TXT output path (overrides config file)
    #[arg(long, value_name = "FILE")]
    txt_output: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("iptv_merge={}", cli.log_level);
    let file_layer = match &cli.log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(std::fs::File::create(path)?)),
        ),
        None => None,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    info!("Starting iptv-merge v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config.display());

    // Override config with CLI arguments
    if let Some(template) = cli.template {
        config.output.template_path = template;
    }
    if let Some(m3u_output) = cli.m3u_output {
        config.output.m3u_path = m3u_output;
    }
    if let Some(txt_output) = cli.txt_output {
        config.output.txt_path = txt_output;
    }

    info!(
        "{} sources configured, fetching {} at a time",
        config.sources.urls.len(),
        config.sources.fetch_concurrency
    );

    let http_client = StandardHttpClient::new(
        config.sources.request_timeout()?,
        &config.sources.user_agent,
    )?;
    let reporter = TracingSourceReporter;

    let summary = Pipeline::new(&config, &http_client, &reporter).run().await?;
    info!(
        "Playlists written: {} and {}",
        summary.files.m3u_path.display(),
        summary.files.txt_path.display()
    );

    Ok(())
}
