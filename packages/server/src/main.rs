#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard server binary.
//!
//! ```text
//! calls_dashboard_server [--data 911.csv] [--bind 127.0.0.1] [--port 8080] [--static-dir DIR]
//! ```
//!
//! Flags override the `CALLS_DATA_PATH`, `BIND_ADDR`, `PORT` and
//! `STATIC_DIR` environment variables.

use std::path::PathBuf;

use calls_dashboard_server::{ServerConfig, run_server};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "calls_dashboard_server",
    about = "Serve the emergency calls dashboard"
)]
struct Cli {
    /// Call records CSV to load at startup
    #[arg(long)]
    data: Option<PathBuf>,
    /// Address to bind
    #[arg(long)]
    bind: Option<String>,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
    /// Directory served under `/static`
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        config
    }
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let config = Cli::parse().apply(ServerConfig::from_env());

    if let Err(e) = run_server(config).await {
        log::error!("{e}");
        return Err(e.into());
    }

    Ok(())
}
