//! Client-side filtering of a space listing
//!
//! Listings are always fetched whole; narrowing by prefix and by
//! file/directory kind happens here.

use serde::Serialize;

use crate::entry::{EntryKind, ObjectEntry};

/// Which entries a listing should keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Files and directories
    #[default]
    All,
    /// Keys not ending in `/`
    Files,
    /// Keys ending in `/`
    Dirs,
}

impl ListKind {
    /// Classification this listing keeps, `None` for everything
    pub const fn entry_kind(self) -> Option<EntryKind> {
        match self {
            ListKind::All => None,
            ListKind::Files => Some(EntryKind::File),
            ListKind::Dirs => Some(EntryKind::Directory),
        }
    }

    /// Banner title for the text form
    pub const fn title(self) -> &'static str {
        match self {
            ListKind::All => "ALL LIST",
            ListKind::Files => "FILE LIST",
            ListKind::Dirs => "DIRECTORY LIST",
        }
    }
}

/// Keep entries under `prefix`, optionally of one kind, preserving order
pub fn filter_entries<'a, I>(entries: I, prefix: &str, kind: Option<EntryKind>) -> Vec<ObjectEntry>
where
    I: IntoIterator<Item = &'a ObjectEntry>,
{
    entries
        .into_iter()
        .filter(|e| e.key.starts_with(prefix))
        .filter(|e| kind.is_none_or(|k| e.kind() == k))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &[ObjectEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    fn sample() -> Vec<ObjectEntry> {
        ["x/a.txt", "x/y/", "z/b.txt"]
            .into_iter()
            .map(ObjectEntry::new)
            .collect()
    }

    #[test]
    fn test_filter_by_prefix() {
        let entries = sample();
        let all = filter_entries(&entries, "x/", ListKind::All.entry_kind());
        assert_eq!(keys(&all), vec!["x/a.txt", "x/y/"]);
    }

    #[test]
    fn test_filter_by_kind() {
        let entries = sample();
        let files = filter_entries(&entries, "x/", ListKind::Files.entry_kind());
        assert_eq!(keys(&files), vec!["x/a.txt"]);

        let dirs = filter_entries(&entries, "x/", ListKind::Dirs.entry_kind());
        assert_eq!(keys(&dirs), vec!["x/y/"]);
    }

    #[test]
    fn test_empty_prefix_keeps_everything_in_order() {
        let entries = sample();
        let all = filter_entries(&entries, "", None);
        assert_eq!(keys(&all), vec!["x/a.txt", "x/y/", "z/b.txt"]);
    }

    #[test]
    fn test_prefix_is_plain_string_match() {
        let entries = vec![ObjectEntry::new("xylophone.mp3"), ObjectEntry::new("x/a")];
        let all = filter_entries(&entries, "x", None);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_titles() {
        assert_eq!(ListKind::All.title(), "ALL LIST");
        assert_eq!(ListKind::Files.title(), "FILE LIST");
        assert_eq!(ListKind::Dirs.title(), "DIRECTORY LIST");
    }
}
