//! shell command - Interactive session over one connection
//!
//! Each input line is parsed as a subcommand. The connection, selected space
//! and cached listing live for the whole session, so repeated `ls` calls do
//! not go back to the service until `refresh` or a space switch.

use std::io::{IsTerminal, Write};

use clap::{Parser, Subcommand};
use spaces_core::{ObjectStore, SpacesClient};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::get::GetArgs;
use super::ls::LsArgs;
use super::put::PutArgs;
use super::{ConnectionArgs, connect, fail};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

#[derive(Parser, Debug)]
#[command(name = "spaces", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// List available spaces
    Spaces,

    /// Switch to another space
    Use {
        /// Space name
        name: String,
    },

    /// List objects in the current space
    Ls(LsArgs),

    /// Download an object
    Get(GetArgs),

    /// Upload a file
    Put(PutArgs),

    /// Re-fetch the space list and drop the cached listing
    Refresh,

    /// Show the region and current space
    Status,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Parse one input line; blank lines and `#` comments yield nothing
fn parse_line(line: &str) -> Option<Result<ShellCommand, clap::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(ShellLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command))
}

/// Run the shell until `exit` or end of input
pub async fn execute(args: &ConnectionArgs, formatter: &Formatter) -> ExitCode {
    let mut client = match connect(args, formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let interactive = std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            print!("{client}> ");
            let _ = std::io::stdout().flush();
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read shell input");
                break;
            }
        };

        let command = match parse_line(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                let _ = err.print();
                continue;
            }
        };

        if matches!(command, ShellCommand::Exit) {
            break;
        }
        let code = dispatch(&mut client, command, formatter).await;
        tracing::debug!(%code, "shell command finished");
    }

    ExitCode::Success
}

async fn dispatch<S: ObjectStore>(
    client: &mut SpacesClient<S>,
    command: ShellCommand,
    formatter: &Formatter,
) -> ExitCode {
    match command {
        ShellCommand::Spaces => super::spaces::run(client, formatter),
        ShellCommand::Use { name } => match client.set_space(Some(&name)) {
            Ok(space) => {
                formatter.success(&format!("Using space '{space}'"));
                ExitCode::Success
            }
            Err(e) => fail(formatter, &e),
        },
        ShellCommand::Ls(args) => super::ls::run(client, &args, formatter).await,
        ShellCommand::Get(args) => super::get::run(client, &args, formatter).await,
        ShellCommand::Put(args) => super::put::run(client, &args, formatter).await,
        ShellCommand::Refresh => match client.refresh_spaces().await.map(|_| ()) {
            Ok(()) => {
                client.invalidate_listing();
                formatter.println(&client.list_spaces_text());
                ExitCode::Success
            }
            Err(e) => fail(formatter, &e),
        },
        ShellCommand::Status => {
            formatter.println(&client.to_string());
            ExitCode::Success
        }
        ShellCommand::Exit => ExitCode::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use spaces_core::{ListKind, ObjectEntry, Region, SpaceInfo};

    use crate::output::OutputConfig;

    /// Store whose listings change on every fetch, recording which space
    /// each fetch targeted
    struct ChangingStore {
        spaces: Vec<&'static str>,
        fetches: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ObjectStore for ChangingStore {
        async fn list_buckets(&self) -> spaces_core::Result<Vec<SpaceInfo>> {
            Ok(self.spaces.iter().map(|n| SpaceInfo::new(*n)).collect())
        }

        async fn list_objects(&self, space: &str) -> spaces_core::Result<Vec<ObjectEntry>> {
            let mut fetches = self.fetches.lock().unwrap();
            fetches.push(space.to_string());
            let round = fetches.iter().filter(|s| *s == space).count();
            Ok(vec![ObjectEntry::new(format!("{space}-v{round}.txt"))])
        }

        async fn download_file(&self, _: &str, _: &str, _: &Path) -> spaces_core::Result<u64> {
            Ok(0)
        }

        async fn upload_file(&self, _: &Path, _: &str, _: &str) -> spaces_core::Result<u64> {
            Ok(0)
        }
    }

    async fn session(
        space: Option<&str>,
    ) -> (SpacesClient<ChangingStore>, Arc<Mutex<Vec<String>>>) {
        let fetches = Arc::new(Mutex::new(Vec::new()));
        let store = ChangingStore {
            spaces: vec!["media", "backups"],
            fetches: Arc::clone(&fetches),
        };
        let client = SpacesClient::connect(store, Region::Nyc3, space).await.unwrap();
        (client, fetches)
    }

    fn quiet() -> Formatter {
        Formatter::new(OutputConfig {
            quiet: true,
            ..Default::default()
        })
    }

    async fn keys(client: &mut SpacesClient<ChangingStore>) -> Vec<String> {
        client
            .list_all("", None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect()
    }

    fn parse(line: &str) -> ShellCommand {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_shell_definition_is_valid() {
        use clap::CommandFactory;
        ShellLine::command().debug_assert();
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("# note").is_none());
    }

    #[test]
    fn test_use_space() {
        assert!(matches!(parse("use media"), ShellCommand::Use { ref name } if name == "media"));
    }

    #[test]
    fn test_ls_with_flags() {
        match parse("  ls photos/ --dirs ") {
            ShellCommand::Ls(args) => {
                assert_eq!(args.prefix, "photos/");
                assert_eq!(args.kind(), ListKind::Dirs);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_put_with_rename() {
        match parse("put clip.mov -d videos -r holiday") {
            ShellCommand::Put(args) => {
                assert_eq!(args.destination, "videos");
                assert_eq!(args.rename.as_deref(), Some("holiday"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quit_alias() {
        assert!(matches!(parse("quit"), ShellCommand::Exit));
        assert!(matches!(parse("exit"), ShellCommand::Exit));
    }

    #[test]
    fn test_errors() {
        assert!(parse_line("frobnicate").unwrap().is_err());
        assert!(parse_line("get").unwrap().is_err());
        let help = parse_line("help").unwrap().unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[tokio::test]
    async fn test_use_then_ls_targets_new_space() {
        let (mut client, fetches) = session(Some("media")).await;
        let formatter = quiet();

        let code = dispatch(&mut client, parse("use backups"), &formatter).await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(client.current_space(), Some("backups"));

        let code = dispatch(&mut client, parse("ls"), &formatter).await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(*fetches.lock().unwrap(), vec!["backups"]);
    }

    #[tokio::test]
    async fn test_use_unknown_space_keeps_selection() {
        let (mut client, _) = session(Some("media")).await;

        let code = dispatch(&mut client, parse("use nope"), &quiet()).await;
        assert_eq!(code, ExitCode::NotFound);
        assert_eq!(client.current_space(), Some("media"));
    }

    #[tokio::test]
    async fn test_ls_without_space_is_usage_error() {
        let (mut client, fetches) = session(None).await;

        let code = dispatch(&mut client, parse("ls"), &quiet()).await;
        assert_eq!(code, ExitCode::UsageError);
        assert!(fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_is_kept_across_commands() {
        let (mut client, fetches) = session(Some("media")).await;
        let formatter = quiet();

        dispatch(&mut client, parse("ls"), &formatter).await;
        dispatch(&mut client, parse("ls --files"), &formatter).await;
        dispatch(&mut client, parse("status"), &formatter).await;
        assert_eq!(keys(&mut client).await, vec!["media-v1.txt"]);
        assert_eq!(fetches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_drops_cached_listing() {
        let (mut client, _) = session(Some("media")).await;
        let formatter = quiet();

        dispatch(&mut client, parse("ls"), &formatter).await;
        assert_eq!(keys(&mut client).await, vec!["media-v1.txt"]);

        let code = dispatch(&mut client, parse("refresh"), &formatter).await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(keys(&mut client).await, vec!["media-v2.txt"]);
        assert_eq!(client.current_space(), Some("media"));
    }

    #[tokio::test]
    async fn test_status_leaves_state_alone() {
        let (mut client, fetches) = session(Some("backups")).await;

        let code = dispatch(&mut client, parse("status"), &quiet()).await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(client.to_string(), "Spaces <Client: nyc3/backups>");
        assert!(fetches.lock().unwrap().is_empty());
    }
}
