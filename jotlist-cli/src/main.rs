//! Jotlist command-line entry point.
//!
//! ```bash
//! jotlist serve --port 8080
//! jotlist ui --add "Buy milk"
//! ```
//!
//! See `jotlist --help` for all available commands and options.

use anyhow::Result;
use clap::{Parser, Subcommand};
use jotlist_core::client::{self, api::ApiClient, UiState};
use jotlist_core::{HttpServer, JotlistConfig, TaskStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "jotlist", about = "Minimal to-do list server and terminal client", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Listening port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listening address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// SQLite database path (overrides config)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Config file (default: ./config.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load and render the task list from a running server
    Ui {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,

        /// Submit this task before rendering
        #[arg(long)]
        add: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, host, db, config } => serve(port, host, db, config).await,
        Commands::Ui { server, add } => ui(server, add).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn serve(
    port: Option<u16>,
    host: Option<String>,
    db: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => JotlistConfig::from_file(path)?,
        None => JotlistConfig::load()?,
    };
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(db) = db {
        config.storage.db_path = db;
    }
    config.validate()?;

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_timestamp_millis()
    .format_module_path(false)
    .try_init();

    if let Some(dir) = config.storage.db_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let store = Arc::new(TaskStore::open(&config.storage.db_path)?);

    log::info!("database: {}", config.storage.db_path.display());
    HttpServer::new(store).bind(&config.server.listen_addr()).await?.serve().await
}

async fn ui(server: String, add: Option<String>) -> Result<()> {
    let client = ApiClient::new(server);
    let mut state = UiState::new();

    client::load_tasks(&mut state, &client).await;
    if let Some(text) = add {
        state.input = text;
        client::submit_task(&mut state, &client).await;
    }

    println!("My To-Do List");
    println!("=============");
    println!("{}", state.render().trim_end());
    Ok(())
}
