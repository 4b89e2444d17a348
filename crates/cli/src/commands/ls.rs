//! ls command - List objects in the current space
//!
//! Entries are filtered client-side by key prefix and by the trailing-slash
//! file/directory convention.

use clap::Args;
use spaces_core::{ListKind, ObjectStore, SpacesClient};

use crate::commands::fail;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// List objects
#[derive(Args, Debug, Clone, Default)]
pub struct LsArgs {
    /// Only keys starting with this prefix (e.g. "photos/")
    #[arg(default_value = "")]
    pub prefix: String,

    /// Only files
    #[arg(long, conflicts_with = "dirs")]
    pub files: bool,

    /// Only directories (keys ending in "/")
    #[arg(long)]
    pub dirs: bool,
}

impl LsArgs {
    pub fn kind(&self) -> ListKind {
        if self.files {
            ListKind::Files
        } else if self.dirs {
            ListKind::Dirs
        } else {
            ListKind::All
        }
    }
}

/// List entries of the current space
pub async fn run<S: ObjectStore>(
    client: &mut SpacesClient<S>,
    args: &LsArgs,
    formatter: &Formatter,
) -> ExitCode {
    let kind = args.kind();

    if formatter.is_json() {
        match client.list(kind, &args.prefix, None).await {
            Ok(entries) => formatter.json(&entries),
            Err(e) => return fail(formatter, &e),
        }
    } else {
        match client.list_text(kind, &args.prefix, None).await {
            Ok(text) => formatter.println(&text),
            Err(e) => return fail(formatter, &e),
        }
    }

    ExitCode::Success
}
