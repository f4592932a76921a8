//! Command-line entry point for staffbook.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use log::info;
use staffbook_core::db::open_db;
use staffbook_core::{EmployeeClient, EmployeeService, SqliteEmployeeRepository};
use staffbook_server::{Server, ServerConfig};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "staffbook")]
#[command(version)]
#[command(about = "Employee records store with a JSON API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Print all employee records as a Markdown table
    Export,

    /// Print core linkage information
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref()).wrap_err("invalid configuration")?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = Some(level);
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = log_dir;
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if no_cors {
                config.cors = false;
            }
            serve(&config).await
        }
        Commands::Export => export(&config),
        Commands::Ping => {
            println!("staffbook_core ping={}", staffbook_core::ping());
            println!("staffbook_core version={}", staffbook_core::core_version());
            Ok(())
        }
    }
}

async fn serve(config: &Config) -> Result<()> {
    init_logging(config)?;
    ensure_parent_dir(&config.db_path)?;

    let conn = open_db(&config.db_path)
        .wrap_err_with(|| format!("failed to open {}", config.db_path.display()))?;
    info!(
        "event=cli_serve module=cli status=start db_path={}",
        config.db_path.display()
    );

    let server_config = ServerConfig::new(config.listen_addr()).with_cors(config.cors);
    eprintln!("staffbook listening on http://{}", server_config.addr);
    Server::new(server_config, conn).run().await?;
    Ok(())
}

fn export(config: &Config) -> Result<()> {
    let conn = open_db(&config.db_path)
        .wrap_err_with(|| format!("failed to open {}", config.db_path.display()))?;
    let repo = SqliteEmployeeRepository::try_new(&conn)?;
    let mut client = EmployeeClient::new(EmployeeService::new(repo));
    client.refresh()?;
    print!("{}", client.export_markdown());
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let log_dir = config
        .log_dir
        .to_str()
        .ok_or_else(|| eyre!("log_dir is not valid UTF-8: {}", config.log_dir.display()))?;
    staffbook_core::init_logging(config.effective_log_level(), log_dir).map_err(|err| eyre!(err))
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
