//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use zk_poe::config::ConfigFile;
use zk_poe::output::OutputMode;

/// zk-poe - Proof-of-execution attestations
#[derive(Parser, Debug)]
#[command(
    name = "zk-poe",
    version,
    about = "Proof-of-execution attestation sidecar and emitter",
    long_about = "Record proof-of-execution attestations for service requests.\n\n\
                  The commitment service derives a commitment and proof id for each\n\
                  attestation. The emitter delivers attestations to it and spools\n\
                  them to disk when it cannot be reached."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML config file (environment variables take precedence)
    #[arg(short, long, global = true, env = "POE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the commitment service
    Serve,

    /// Emit one attestation (deliver, or spool on failure)
    Emit {
        /// Request id
        #[arg(long)]
        req_id: String,

        /// Call input as JSON (non-JSON text is attested as a string)
        #[arg(long, default_value = "null")]
        input: String,

        /// Call output as JSON (non-JSON text is attested as a string)
        #[arg(long, default_value = "null")]
        output: String,
    },

    /// Compute the receipt for an attestation file with the configured secret
    Commit {
        /// Path to a JSON attestation (e.g. a spooled file)
        file: PathBuf,
    },

    /// Inspect the spool directory
    Spool {
        #[command(subcommand)]
        action: SpoolAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum SpoolAction {
    /// List spooled attestations
    List,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let file = ConfigFile::load_optional(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Serve) => commands::serve(&file),
        Some(Command::Emit {
            req_id,
            input,
            output,
        }) => commands::emit(&file, &req_id, &input, &output, output_mode),
        Some(Command::Commit { file: path }) => commands::commit(&file, &path, output_mode),
        Some(Command::Spool {
            action: SpoolAction::List,
        }) => commands::spool_list(&file, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": zk_poe::VERSION
                    })
                );
            } else {
                println!("zk-poe v{}", zk_poe::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": zk_poe::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("zk-poe v{}", zk_poe::VERSION);
                println!("\nRun 'zk-poe --help' for usage");
                println!("Run 'zk-poe serve' to start the commitment service");
            }
            Ok(())
        },
    }
}
