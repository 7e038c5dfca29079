//! # fleetdash: server-fleet console
//!
//! Composition root that wires all adapters together and runs one command.
//!
//! ## Responsibilities
//! - Parse the command line and configuration (file, env vars)
//! - Install the tracing subscriber
//! - Open the `SQLite` session store and run migrations
//! - Build the fixture backend, the simulated network and the dispatcher
//! - Restore the session and hand it to the console shell
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fleetdash_adapter_fixtures::FixtureCatalog;
use fleetdash_adapter_storage_sqlite_sqlx::{Database, StorageError};
use fleetdash_app::dispatcher::MockDispatcher;
use fleetdash_app::network::SimulatedNetwork;
use fleetdash_app::services::session_service::SessionService;
use fleetdash_domain::credentials::LoginCredentials;
use fleetdash_domain::error::FleetDashError;
use fleetdash_domain::id::ServerId;
use fleetdash_domain::server::ServerAction;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};
use crate::shell::{Console, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "fleetdash", version, about = "Mock server-fleet dashboard console")]
struct Cli {
    /// Configuration file (defaults to ./fleetdash.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw payloads as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// Fleet-wide dashboard metrics.
    Metrics,
    /// List all servers.
    Servers,
    /// Show one server in detail.
    Server { id: ServerId },
    Restart { id: ServerId },
    Stop { id: ServerId },
    Start { id: ServerId },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error")]
    Config(#[from] ConfigError),
    #[error("could not open the session store")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Dashboard(#[from] FleetDashError),
}

impl CliError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => match std::error::Error::source(err) {
                Some(cause) => format!("{err}: {cause}"),
                None => err.to_string(),
            },
            Self::Storage(err) => format!("{self}: {err}"),
            Self::Dashboard(err) => err.user_message(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("fleetdash: {}", CliError::from(err).user_message());
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.filter);

    match run(cli, &config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: &Config) -> Result<String, CliError> {
    // Session store
    let db = Database::open(config.database_url()).await?;
    let store = db.kv_store();

    // Network + backend
    let network_config = config.network_config();
    let network = match config.network.seed {
        Some(seed) => SimulatedNetwork::seeded(network_config, seed),
        None => SimulatedNetwork::new(network_config),
    }
    .map_err(FleetDashError::from)?;
    let dispatcher = Arc::new(MockDispatcher::new(FixtureCatalog::default(), network));

    // Session + shell
    let session = SessionService::restore(store, dispatcher).await?;
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut console = Console::new(session, format);

    let output = match cli.command {
        Command::Login { email, password } => {
            console
                .submit_login(&LoginCredentials::new(email, password))
                .await?
        }
        Command::Logout => console.logout().await,
        Command::Whoami => console.whoami().await?,
        Command::Metrics => console.metrics().await?,
        Command::Servers => console.servers().await?,
        Command::Server { id } => console.server(id).await?,
        Command::Restart { id } => console.server_action(id, ServerAction::Restart).await?,
        Command::Stop { id } => console.server_action(id, ServerAction::Stop).await?,
        Command::Start { id } => console.server_action(id, ServerAction::Start).await?,
    };
    Ok(output)
}
