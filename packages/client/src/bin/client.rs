//! Presence client for Campus Catalyst.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin catalyst-client
//! cargo run --bin catalyst-client -- --identity 7
//! cargo run --bin catalyst-client -- --url ws://campus.edu/ws --identity alice
//! ```

use catalyst_client::{ClientConfig, run_client};
use catalyst_server::domain::Identity;
use catalyst_shared::logger::setup_logger;
use clap::Parser;

/// Campus Catalyst presence client
#[derive(Parser, Debug)]
#[command(name = "catalyst-client")]
#[command(about = "Watch who is online and announce your own presence", long_about = None)]
struct Args {
    /// WebSocket endpoint of the presence server
    #[arg(short = 'u', long, env = "CATALYST_URL", default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Identity to announce after connecting (integer or token)
    #[arg(short = 'i', long, value_parser = parse_identity)]
    identity: Option<Identity>,

    /// HTTP base URL for snapshot polling (derived from --url when omitted)
    #[arg(long, env = "CATALYST_API_URL")]
    api_url: Option<String>,
}

fn parse_identity(raw: &str) -> Result<Identity, String> {
    Identity::parse(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ClientConfig::new(args.url, args.api_url, args.identity);

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
