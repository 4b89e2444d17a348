//! get command - Download an object
//!
//! The object lands at DESTINATION/KEY; missing directories are created.

use std::path::PathBuf;

use clap::Args;
use spaces_core::{ObjectStore, SpacesClient};

use crate::commands::{fail, transfer_summary};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// Download an object
#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Object key
    pub key: String,

    /// Local directory to download into
    #[arg(default_value = "downloads/")]
    pub destination: PathBuf,
}

/// Download from the current space
pub async fn run<S: ObjectStore>(
    client: &mut SpacesClient<S>,
    args: &GetArgs,
    formatter: &Formatter,
) -> ExitCode {
    let spinner = Spinner::start(formatter.config(), &format!("Downloading {}", args.key));
    let result = client.download_file(&args.key, &args.destination, None).await;
    spinner.finish();

    match result {
        Ok(report) => {
            if formatter.is_json() {
                formatter.json(&report);
            } else {
                formatter.println(&transfer_summary(&report));
            }
            ExitCode::Success
        }
        Err(e) => fail(formatter, &e),
    }
}
