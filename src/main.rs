//! sitecheck CLI
//!
//! Registers a URL in an in-memory store, checks it once and prints the
//! notices and the resulting check record.

use anyhow::Context;
use clap::Parser;
use sitecheck::config::{CheckConfig, FieldLimits, StoreConfig};
use sitecheck::{CheckPipeline, MemoryStore, NoticeLevel, SiteChecker};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// On-demand SEO site check
#[derive(Parser, Debug)]
#[command(name = "sitecheck")]
#[command(version)]
#[command(about = "Fetch a page and report its status, h1, title and meta description")]
struct Args {
    /// URL to check
    url: String,

    /// Connect timeout in seconds (overrides SITECHECK_CONNECT_TIMEOUT_SECS)
    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    /// Overall request timeout in seconds (overrides SITECHECK_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Verify TLS certificates
    #[arg(long)]
    verify_tls: bool,

    /// Status code recorded when the fetch fails
    #[arg(long)]
    failure_status: Option<u16>,

    /// Maximum length of h1, title and description
    #[arg(long)]
    max_field_length: Option<usize>,

    /// Print the check record as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn check_config(&self) -> anyhow::Result<CheckConfig> {
        let mut config = CheckConfig::from_env().context("reading SITECHECK_* environment")?;

        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if self.verify_tls {
            config.accept_invalid_certs = false;
        }
        if let Some(status) = self.failure_status {
            config.failure_status = status;
        }
        if let Some(max) = self.max_field_length {
            let mut limits = FieldLimits::none();
            for field in sitecheck::Field::ALL {
                limits = limits.with(field, max)?;
            }
            config.field_limits = limits;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.check_config()?;
    let store = MemoryStore::new(StoreConfig::from_env()?);
    let pipeline = CheckPipeline::new(config).context("building HTTP client")?;
    let checker = SiteChecker::new(store, pipeline);

    let added = checker.add_url(&args.url)?;
    let outcome = checker.check_url(added.url_id).await?;

    for notice in added.notices.iter().chain(&outcome.notices) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Danger => "error",
            NoticeLevel::Warning => "warning",
        };
        eprintln!("[{tag}] {}", notice.message);
    }

    let result = &outcome.result;
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("status:      {}", result.status_code());
        println!("h1:          {}", result.h1().unwrap_or("-"));
        println!("title:       {}", result.title().unwrap_or("-"));
        println!("description: {}", result.description().unwrap_or("-"));
        println!("checked at:  {}", result.created_at().to_rfc3339());
    }

    if result.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}
