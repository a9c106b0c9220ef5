//! beanboard: dry-bean dataset CRUD service and terminal dashboard
//!
//! Run without a subcommand to start the HTTP API. Client subcommands
//! (list, show, add, edit, remove, stats, chart, export) talk to a running
//! server; `seed` loads a CSV straight into the database file.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use beanboard::cli::{self, Commands};
use beanboard::config::Config;
use beanboard::server::{create_router, AppState};
use beanboard::store::BeanDb;

#[derive(Parser)]
#[command(name = "beanboard")]
#[command(about = "CRUD service and terminal dashboard for the dry-bean dataset")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "beanboard.toml")]
    config: String,

    /// Database file (overrides config file)
    #[arg(short, long, env = "BEANBOARD_DB")]
    database: Option<PathBuf>,

    /// HTTP port (overrides config file)
    #[arg(short, long, env = "BEANBOARD_PORT")]
    port: Option<u16>,

    /// API base URL for client commands (overrides config file)
    #[arg(long, env = "BEANBOARD_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("beanboard=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // Load config, falling back to defaults when the file does not exist
    let mut config = Config::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(port) = cli.port {
        config.server.http_port = port;
    }
    if let Some(api_url) = cli.api_url {
        config.client.api_url = api_url;
    }

    // Client commands print and exit; no command (or `serve`) runs the API
    match cli.command {
        None | Some(Commands::Serve) => {}
        Some(command) => {
            match cli::execute_command(&config, command).await {
                Ok(output) => {
                    println!("{}", output);
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    info!("Starting beanboard API");
    info!("Database: {}", config.database.path.display());

    let db = BeanDb::open(&config.database.path)?;
    let state = Arc::new(AppState { db });
    let app = create_router(state);

    let bind: IpAddr = config.server.bind.parse()?;
    let addr = SocketAddr::from((bind, config.server.http_port));
    info!("API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
