//! scicalc CLI entry point.
//!
//! Usage:
//!   scicalc                          # Interactive prompt
//!   scicalc serve [--host H] [--port P]
//!   scicalc eval <operation> [operands...]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use scicalc::Config;

#[derive(Parser, Debug)]
#[command(name = "scicalc", version, about)]
struct Cli {
    /// Configuration file (default: ~/.config/scicalc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive prompt (the default)
    Repl,

    /// Serve the JSON API and the web page
    Serve {
        /// Address to bind, overriding the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Evaluate a single operation and print the result
    Eval {
        /// Operation token (+, -, *, /, sin, cos, tan, cot, log, power, mod, pi)
        operation: String,

        /// Operands, e.g. `10 3` or `2 30` for a multiplied sine
        #[arg(allow_hyphen_values = true)]
        operands: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.command);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing (respects RUST_LOG env var).
fn init_tracing(command: &Option<Command>) {
    let default_level = match command {
        Some(Command::Serve { .. }) => "info",
        _ => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            scicalc::repl::run(&config.repl)?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Serve { host, port } => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
            rt.block_on(scicalc::server::serve(&server))?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Eval {
            operation,
            operands,
        } => match scicalc::eval::run_once(&operation, &operands) {
            Ok(line) => {
                println!("{}", line);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
