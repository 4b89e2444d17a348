//! CLI command definitions and execution
//!
//! Commands that talk to the service share one connection path: resolve the
//! env file, credentials and region, build the store, then run against a
//! `SpacesClient`. The interactive shell reuses the same `run` functions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use spaces_core::{Credentials, EnvFileLoader, Error, Region, SpacesClient, TransferReport};
use spaces_s3::S3Store;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod completions;
pub mod get;
pub mod ls;
pub mod put;
pub mod regions;
pub mod shell;
pub mod spaces;

/// spaces - object storage client
///
/// Lists, uploads and downloads objects in DigitalOcean Spaces or any
/// other S3-compatible service.
#[derive(Parser, Debug)]
#[command(name = "spaces")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How to reach the service
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Region code (ams3, fra1, nyc3, sgp1, sfo2, sfo3)
    #[arg(long, global = true, env = "SPACES_REGION")]
    pub region: Option<String>,

    /// Space to select
    #[arg(long, global = true, env = "SPACES_SPACE")]
    pub space: Option<String>,

    /// Access key ID
    #[arg(long, global = true, env = "SPACES_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// Secret access key
    #[arg(long, global = true, env = "SPACES_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Env file with keys and defaults (default: ./env.toml, then ~/.config/spaces/env.toml)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Custom S3-compatible endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported region codes
    Regions,

    /// List available spaces
    Spaces,

    /// List objects in the current space
    Ls(ls::LsArgs),

    /// Download an object
    Get(get::GetArgs),

    /// Upload a file
    Put(put::PutArgs),

    /// Run an interactive shell
    Shell,

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config);

    match cli.command {
        Commands::Regions => regions::execute(&formatter),
        Commands::Completions(args) => completions::execute(args),
        Commands::Shell => shell::execute(&cli.connection, &formatter).await,
        Commands::Spaces => match connect(&cli.connection, &formatter).await {
            Ok(client) => spaces::run(&client, &formatter),
            Err(code) => code,
        },
        Commands::Ls(args) => match connect(&cli.connection, &formatter).await {
            Ok(mut client) => ls::run(&mut client, &args, &formatter).await,
            Err(code) => code,
        },
        Commands::Get(args) => match connect(&cli.connection, &formatter).await {
            Ok(mut client) => get::run(&mut client, &args, &formatter).await,
            Err(code) => code,
        },
        Commands::Put(args) => match connect(&cli.connection, &formatter).await {
            Ok(mut client) => put::run(&mut client, &args, &formatter).await,
            Err(code) => code,
        },
    }
}

/// Report an error and map it to an exit code
pub(crate) fn fail(formatter: &Formatter, err: &Error) -> ExitCode {
    formatter.error(&err.to_string());
    ExitCode::from(err)
}

/// Human summary of a finished transfer, with the size appended
pub(crate) fn transfer_summary(report: &TransferReport) -> String {
    format!(
        "{report}\n- Size -> {}",
        humansize::format_size(report.bytes, humansize::BINARY)
    )
}

/// Build a connected client, reporting failures through the formatter
pub(crate) async fn connect(
    args: &ConnectionArgs,
    formatter: &Formatter,
) -> Result<SpacesClient<S3Store>, ExitCode> {
    try_connect(args).await.map_err(|e| fail(formatter, &e))
}

async fn try_connect(args: &ConnectionArgs) -> spaces_core::Result<SpacesClient<S3Store>> {
    let loader = match &args.env_file {
        Some(path) => EnvFileLoader::with_path(path),
        None => EnvFileLoader::new(),
    };
    let env = loader.load()?;

    if let (Some(path), None) = (&args.env_file, &env) {
        return Err(Error::Config(format!(
            "env file {} not found",
            path.display()
        )));
    }

    let credentials = Credentials::resolve(
        args.public_key.as_deref(),
        args.secret_key.as_deref(),
        env.as_ref(),
    )?;

    let region: Region = args
        .region
        .as_deref()
        .or_else(|| env.as_ref().and_then(|e| e.region.as_deref()))
        .ok_or_else(|| {
            Error::Config(format!(
                "no region given; pass --region or set 'region' in the env file ({})",
                Region::codes().join(", ")
            ))
        })?
        .parse()?;

    let endpoint = args
        .endpoint
        .as_deref()
        .or_else(|| env.as_ref().and_then(|e| e.endpoint.as_deref()));
    let space = args
        .space
        .as_deref()
        .or_else(|| env.as_ref().and_then(|e| e.space.as_deref()));

    let store = S3Store::new(region, &credentials, endpoint).await?;
    SpacesClient::connect(store, region, space).await
}
