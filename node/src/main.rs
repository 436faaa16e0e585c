use anyhow::Context;
use clap::Parser;
use node::{logging, EmogoNode, NodeConfig};
use std::path::PathBuf;
use tracing::info;

/// EmoGo journaling backend
#[derive(Parser, Debug)]
#[command(name = "emogo-node", version, about)]
struct Args {
    /// Path to a TOML config file (defaults to config/emogo.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override api.bind_address
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Override api.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        NodeConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.api.bind_address = bind;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    config.validate().context("invalid command line override")?;

    logging::init_logging(&config.node.log_level)
        .context("failed to initialize logging")?;

    info!("Starting EmoGo backend v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let node = EmogoNode::new(config).context("failed to open document store")?;
    node.run().await?;

    info!("EmoGo backend stopped");
    Ok(())
}
