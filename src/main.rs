//! certstore backend entry point
//!
//! One invocation executes one API command: the command name arrives as the
//! positional argument, the JSON request body on stdin, and the JSON
//! response leaves on stdout. Logging goes to stderr so the response channel
//! stays clean. Exit status zero means success; every failure emits
//! `{"Error": <message>}` and a non-zero status.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use certstore::{commands, provider::OpensslProvider, settings::Settings};

#[derive(Parser)]
#[command(name = "certstore")]
#[command(about = "Keystore backend for certificate lifecycle managers")]
#[command(version)]
struct Cli {
    /// API command to execute (request body is read from stdin)
    command: String,

    /// Path to the TOML settings file (defaults to $CERTSTORE_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(response) => {
            println!("{response}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(command = %cli.command, "{err}");
            println!("{}", serde_json::json!({ "Error": err.to_string() }));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> certstore::Result<serde_json::Value> {
    let settings = Settings::load(cli.config.as_deref())?;
    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body)?;
    commands::dispatch(&cli.command, &body, &settings, &OpensslProvider)
}
