//! Text blocks for listings
//!
//! Every block is a banner line, a `==========` rule, one indented record per
//! item closed by `----------`, and a final rule.

use std::fmt::Write as _;

use crate::entry::{ObjectEntry, SpaceInfo};
use crate::listing::ListKind;
use crate::region::Region;

const RULE: &str = "==========";
const MISSING: &str = "-";

/// Render the spaces visible to the account
pub fn spaces_block(spaces: &[SpaceInfo]) -> String {
    let mut out = format!("AVAILABLE SPACES\n{RULE}");
    for space in spaces {
        let created = space
            .creation_date
            .map(|t| t.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let _ = write!(
            out,
            "\n    Name: {}\n        CreationDate: {created}\n    ----------",
            space.name
        );
    }
    out.push('\n');
    out.push_str(RULE);
    out
}

/// Render one record of an object listing
pub fn entry_record(entry: &ObjectEntry) -> String {
    let modified = entry
        .last_modified
        .map(|t| t.to_string())
        .unwrap_or_else(|| MISSING.to_string());
    format!(
        "\n    Name: {} [{}]\n        LastModified: {modified}\n        ETag: {}\n        Owner: {}\n    ----------",
        entry.key,
        entry.kind(),
        entry.etag.as_deref().unwrap_or(MISSING),
        entry.owner.as_deref().unwrap_or(MISSING),
    )
}

/// Render a filtered object listing of `region/space`
pub fn entries_block(
    region: Region,
    space: &str,
    kind: ListKind,
    entries: &[ObjectEntry],
) -> String {
    let mut out = format!("== [{region}/{space}] {} ==\n{RULE}", kind.title());
    for entry in entries {
        out.push_str(&entry_record(entry));
    }
    out.push('\n');
    out.push_str(RULE);
    out
}
