//! API Gateway - HTTP entry point of the user registry.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;

#[derive(Parser, Debug)]
#[command(name = "gateway")]
#[command(author, version, about = "User registry HTTP gateway", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides GATEWAY_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides GATEWAY_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = GatewayConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            gateway_lib::run_server(config).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {:?}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
