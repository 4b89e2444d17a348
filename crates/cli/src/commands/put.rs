//! put command - Upload a file
//!
//! The key is DESTINATION/NAME.EXT, where NAME is the file's base name or
//! the --rename value. The extension of the local file is always kept.

use std::path::PathBuf;

use clap::Args;
use spaces_core::{ObjectStore, SpacesClient};

use crate::commands::{fail, transfer_summary};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// Upload a file
#[derive(Args, Debug, Clone)]
pub struct PutArgs {
    /// Local file to upload
    pub file: PathBuf,

    /// Key prefix to upload under (e.g. "videos/2024")
    #[arg(short, long, default_value = "")]
    pub destination: String,

    /// New base name, without extension or path
    #[arg(short, long)]
    pub rename: Option<String>,
}

/// Upload into the current space
pub async fn run<S: ObjectStore>(
    client: &mut SpacesClient<S>,
    args: &PutArgs,
    formatter: &Formatter,
) -> ExitCode {
    let spinner = Spinner::start(
        formatter.config(),
        &format!("Uploading {}", args.file.display()),
    );
    let result = client
        .upload_file(&args.file, &args.destination, args.rename.as_deref(), None)
        .await;
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
