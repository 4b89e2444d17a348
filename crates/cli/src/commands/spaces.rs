//! spaces command - List available spaces

use spaces_core::{ObjectStore, SpacesClient};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Print the spaces known to the client
pub fn run<S: ObjectStore>(client: &SpacesClient<S>, formatter: &Formatter) -> ExitCode {
    if formatter.is_json() {
        formatter.json(client.list_spaces());
    } else {
        formatter.println(&client.list_spaces_text());
    }
    ExitCode::Success
}
