//! mockd - CLI entry point.

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use mockd::config;
use mockd::router::{MockRoute, MockRouter};
use mockd::server;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "mockd",
    about = "Configuration-driven HTTP mock server - static route stubbing with latency simulation",
    version,
    disable_help_flag = true
)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'h', long = "host", default_value = "127.0.0.1:9527")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "info")]
    log_level: Level,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // The config file flag is required; missing means usage + exit 1.
    let Some(file) = args.file else {
        Args::command().print_help()?;
        std::process::exit(1);
    };

    info!(path = %file.display(), "Loading configuration");
    let routes = config::load_routes(&file)?;

    if args.validate {
        println!("Configuration is valid ({} routes defined)", routes.len());
        return Ok(());
    }

    // Register every route, printing one startup block per descriptor
    // before the listener starts accepting traffic.
    let mut router = MockRouter::new();
    for (i, desc) in routes.iter().enumerate() {
        let route = MockRoute::compile(desc)
            .with_context(|| format!("Route {} ({})", i, desc.uri))?;
        println!("{}", route.summary(&desc.uri));
        router.register(desc.uri.clone(), route);
    }

    server::serve(&args.host, router).await
}
