//! Topomap - Network topology discovery CLI
//!
//! Crawls a network from a seed device, classifying neighbors and following
//! crawlable ones, then prints the discovered topology as a tree. Runs
//! against the built-in simulated network.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use topomap_core::{render_tree, Classifier, ClassifierConfig, CrawlFilters};
use topomap_discovery::{Credentials, Discoverer, MockNetwork};

#[derive(Parser, Debug)]
#[command(name = "topomap")]
#[command(about = "Network topology discovery via CDP and LLDP")]
#[command(version)]
struct Args {
    /// Management IP of the seed device
    seed: String,

    /// Connection profile for the seed device
    #[arg(long, default_value = "cisco_ios")]
    device_type: String,

    /// Login username
    #[arg(short, long, default_value = "admin")]
    username: String,

    /// Login password
    #[arg(short, long, default_value = "admin")]
    password: String,

    /// Maximum crawl depth from the seed
    #[arg(short, long, default_value_t = 3)]
    depth: usize,

    /// Path to the device-type pattern file
    #[arg(short, long, default_value = "topomap.toml")]
    config: PathBuf,

    /// Hostname to use as the tree root (default: first alphabetically)
    #[arg(long)]
    root: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Do not crawl through routers
    #[arg(long)]
    no_routers: bool,

    /// Do not crawl through switches
    #[arg(long)]
    no_switches: bool,

    /// Do not crawl through IP phones
    #[arg(long)]
    no_phones: bool,

    /// Do not crawl through servers and hosts
    #[arg(long)]
    no_servers: bool,

    /// Do not crawl through wireless access points
    #[arg(long)]
    no_access_points: bool,

    /// Do not crawl through devices with unrecognized capabilities
    #[arg(long)]
    no_other: bool,
}

impl Args {
    /// Crawl filters: every category is followed unless excluded
    fn filters(&self) -> CrawlFilters {
        CrawlFilters {
            routers: !self.no_routers,
            switches: !self.no_switches,
            phones: !self.no_phones,
            servers: !self.no_servers,
            access_points: !self.no_access_points,
            other: !self.no_other,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Topomap v{}", env!("CARGO_PKG_VERSION"));

    // Load the pattern table, falling back to the built-in defaults
    let config = if args.config.exists() {
        info!(path = %args.config.display(), "Loading device type patterns");
        ClassifierConfig::from_file(&args.config)?
    } else {
        warn!(path = %args.config.display(), "Pattern file not found, using defaults");
        ClassifierConfig::default()
    };

    let credentials = Credentials {
        username: args.username.clone(),
        password: args.password.clone(),
    };
    let filters = args.filters();

    let discoverer = Discoverer::new(MockNetwork::example(), Classifier::new(config));
    let report = discoverer
        .discover(
            &args.seed,
            &args.device_type,
            &credentials,
            args.depth,
            Some(&filters),
        )
        .await?;

    println!("{}", render_tree(&report.topology, args.root.as_deref()));
    println!(
        "{} devices, {} links, {} visited",
        report.topology.device_count(),
        report.topology.link_count(),
        report.visited.len()
    );
    println!("Visited: {}", report.visited.join(", "));

    Ok(())
}
