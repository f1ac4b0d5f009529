//! # Web Server Binary Entry Point
//!
//! Serves the steganography HTTP API and the browser front end.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin web_server -- --config config/web.toml
//! ```
//!
//! Without `--config` the defaults apply: `127.0.0.1:5000`, 50 MB uploads,
//! front end served from `./frontend`.

use clap::Parser;
use log::info;

use hide_npng::server::{router, WebConfig};
use hide_npng::utils::init_logger;

/// Command-line arguments for the web server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the web server configuration file (TOML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address, overrides the configuration file
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WebConfig::from_file(path)?,
        None => WebConfig::default(),
    };
    if let Some(address) = args.address {
        config.server.address = address;
    }

    let addr = config.server.address.clone();
    let app = router(config);

    info!("🌐 Web server running on http://{}", addr);
    info!("📡 API endpoints: /api/check-capacity, /api/hide, /api/extract");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
