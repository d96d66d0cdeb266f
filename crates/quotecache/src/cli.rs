//! Command line interface
//!
//! Inspection tooling around the cache: what key and TTL band a request maps
//! to, which backends are linked in, and whether the configured one answers.
//! Every command renders to a `String` so the binary only prints.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use quotecache_application::list_cache_stores;
use quotecache_domain::{BarInterval, KeyParams, ResourceClass, TtlBand, TtlPolicy};
use quotecache_infrastructure::config::AppConfig;
use quotecache_infrastructure::constants::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_VERTICAL};
use quotecache_infrastructure::logging::init_logging;
use quotecache_infrastructure::{ConfigLoader, init_app};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Command line interface for quotecache
#[derive(Parser, Debug)]
#[command(name = "quotecache")]
#[command(about = "Inspect quotecache keys, TTL bands and cache backends")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the cache key a request maps to
    Key(RequestArgs),
    /// Print the TTL band a request is cached with
    Ttl(RequestArgs),
    /// List the TTL bands
    Bands,
    /// List the registered cache backends
    Backends,
    /// Ping the configured cache backend
    Check,
    /// Print the effective configuration as TOML
    Config,
}

/// Description of one cacheable request
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Resource class (quote, hist, ref)
    pub resource: ResourceClass,

    /// Key namespace segment
    #[arg(long, default_value = DEFAULT_CACHE_NAMESPACE)]
    pub namespace: String,

    /// Key vertical segment
    #[arg(long, default_value = DEFAULT_CACHE_VERTICAL)]
    pub vertical: String,

    /// Comma-separated tickers
    #[arg(short, long, value_delimiter = ',')]
    pub tickers: Vec<String>,

    /// Keep the ticker order instead of treating them as a set
    #[arg(long)]
    pub ordered: bool,

    /// Bar interval (1m, 5m, 15m, 30m, 1h, 1d, 1w, 1mo)
    #[arg(short, long)]
    pub interval: Option<BarInterval>,

    /// Window start (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Window end (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// 1-based page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Enumerated filter as `name=value`; repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

impl RequestArgs {
    /// Key parameters described by the arguments
    pub fn params(&self) -> KeyParams {
        let mut params = KeyParams::new();
        if !self.tickers.is_empty() {
            params = if self.ordered {
                params.with_ordered_tickers(self.tickers.iter().cloned())
            } else {
                params.with_ticker_set(self.tickers.iter().cloned())
            };
        }
        if let Some(interval) = self.interval {
            params = params.with_interval(interval);
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            params = params.with_date_window(from, to);
        }
        params.page = self.page;
        params.page_size = self.page_size;
        for (name, value) in &self.filters {
            params = params.with_filter(name.clone(), value.clone());
        }
        params
    }
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => {
            Ok((name.to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{raw}'")),
    }
}

/// Load configuration, initialize logging and execute the command
pub async fn run(cli: Cli) -> Result<String> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    match cli.command {
        Command::Key(args) => render_key(&config, &args),
        Command::Ttl(args) => render_ttl(&args),
        Command::Bands => Ok(render_bands()),
        Command::Backends => Ok(render_backends()),
        Command::Check => check_backend(config).await,
        Command::Config => render_config(&config),
    }
}

/// Cache key of a request under the configured schema
pub fn render_key(config: &AppConfig, args: &RequestArgs) -> Result<String> {
    let builder = config.keys.builder()?;
    let key = builder
        .build(&args.namespace, &args.vertical, args.resource, &args.params())
        .context("invalid request parameters")?;
    Ok(key.into_string())
}

/// TTL band and duration of a request
pub fn render_ttl(args: &RequestArgs) -> Result<String> {
    let band = TtlPolicy::new()
        .band_for(args.resource, &args.params())
        .context("no TTL band for request")?;
    Ok(format!("{band} {}s", band.duration().as_secs()))
}

/// One line per TTL band, shortest first
pub fn render_bands() -> String {
    let mut out = String::new();
    for band in TtlBand::ALL {
        let _ = writeln!(out, "{:<10} {:>6}s", band.as_str(), band.duration().as_secs());
    }
    out.trim_end().to_string()
}

/// One line per registered backend
pub fn render_backends() -> String {
    let mut out = String::new();
    for (name, description) in list_cache_stores() {
        let _ = writeln!(out, "{name:<8} {description}");
    }
    out.trim_end().to_string()
}

/// Effective configuration as TOML
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to render configuration")
}

/// Round-trip to the configured backend
pub async fn check_backend(config: AppConfig) -> Result<String> {
    let backend = config.cache.effective_backend();
    let context = init_app(config)?;
    context
        .health_check()
        .await
        .with_context(|| format!("cache backend '{backend}' is unreachable"))?;
    Ok(format!("{backend}: ok"))
}
