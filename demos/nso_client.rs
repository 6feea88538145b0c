//! Command line RESTCONF client
//!
//! Usage:
//!   cargo run --example nso_client -- --host 10.0.0.1 --username admin --password admin <command>
//!
//! Commands:
//!   info                        - Show YANG library information
//!   datastore <name>            - Dump a whole datastore (running, operational, ...)
//!   get <path>                  - Read a data path, e.g. tailf-ncs:devices/device=ex0
//!   put <path> <json>           - Replace a data path
//!   delete <path>               - Delete a data path

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use nso_restconf::{ClientConfig, Datastore, ResourcePath, RestconfClient, RestconfError, Scheme};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nso-client")]
#[command(about = "Command line client for the NSO RESTCONF API")]
struct Args {
    /// Server host name or address
    #[arg(long)]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,

    #[arg(short, long)]
    username: String,

    #[arg(short, long)]
    password: String,

    /// Use https instead of http
    #[arg(long)]
    https: bool,

    /// Skip TLS certificate validation
    #[arg(long)]
    insecure: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Datastore for get/put/delete (data, running, operational, ...)
    #[arg(long, default_value = "data")]
    datastore: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Info,
    Datastore { name: String },
    Get { path: String },
    Put { path: String, json: String },
    Delete { path: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(Some(value)) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<Option<Value>, RestconfError> {
    let scheme = if args.https {
        Scheme::Https
    } else {
        Scheme::Http
    };
    let config = ClientConfig::new(args.host, args.username, args.password)
        .with_port(args.port)
        .with_scheme(scheme)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_verify_ssl(!args.insecure);
    let client = RestconfClient::new(config)?;

    let datastore = parse_datastore(&args.datastore)?;

    match args.command {
        Command::Info => client.info().map(Some),
        Command::Datastore { name } => client.get_datastore(parse_datastore(&name)?),
        Command::Get { path } => client.get(datastore, &ResourcePath::parse(&path)?),
        Command::Put { path, json } => {
            let payload: Value = serde_json::from_str(&json)?;
            client.put(datastore, &ResourcePath::parse(&path)?, &payload)
        }
        Command::Delete { path } => client.delete(datastore, &ResourcePath::parse(&path)?),
    }
}

fn parse_datastore(name: &str) -> Result<Datastore, RestconfError> {
    Datastore::from_name(name)
        .ok_or_else(|| RestconfError::Configuration(format!("unknown datastore: {name}")))
}
