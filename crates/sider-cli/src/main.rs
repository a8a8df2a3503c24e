//! Sider operator CLI - dataset digest and legacy dataset copy.

use clap::{Parser, Subcommand};
use sider_client::{ConnectionConfig, DEFAULT_DB, DEFAULT_HOST, DEFAULT_PORT};
use sider_digest::DigestAlg;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{prelude::*, EnvFilter};

mod commands;
mod error;
mod output;
mod tool;

use commands::{copy, sha1};

#[derive(Parser)]
#[command(name = "sider")]
#[command(about = "Operator tools for Sider datasets")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the order-independent digest of a whole database
    Sha1 {
        /// Server host
        #[arg(env = "SIDER_HOST", default_value = DEFAULT_HOST)]
        host: String,
        /// Server port
        #[arg(env = "SIDER_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Logical database number
        #[arg(env = "SIDER_DB", default_value_t = DEFAULT_DB)]
        db: i64,
        /// Hash primitive (sha-1 matches the legacy tool)
        #[arg(long, default_value_t = DigestAlg::Sha1)]
        alg: DigestAlg,
        /// Leave keys of unsupported types (hash, stream, ...) out instead of failing
        #[arg(long)]
        skip_unsupported: bool,
        /// Connect timeout in seconds
        #[arg(long, default_value_t = 5)]
        timeout: u64,
        /// Output the digest report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy a whole dataset with the external sider-copy tool (deprecated)
    Copy {
        /// Source server host
        srchost: String,
        /// Source server port
        srcport: u16,
        /// Destination server host
        dsthost: String,
        /// Destination server port
        dstport: u16,
        /// Copy executable to run
        #[arg(long, env = "SIDER_COPY_BIN", default_value = "sider-copy")]
        tool: PathBuf,
        /// Do not wait for confirmation that the destination was flushed
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sha1 {
            host,
            port,
            db,
            alg,
            skip_unsupported,
            timeout,
            json,
        } => {
            let mut config = ConnectionConfig::new(host, port, db);
            config.connect_timeout = Duration::from_secs(timeout);
            sha1::run(config, alg, skip_unsupported, json)
        }
        Commands::Copy {
            srchost,
            srcport,
            dsthost,
            dstport,
            tool,
            yes,
        } => copy::run(
            ConnectionConfig::new(srchost, srcport, DEFAULT_DB),
            ConnectionConfig::new(dsthost, dstport, DEFAULT_DB),
            tool,
            yes,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
