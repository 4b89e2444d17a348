//! Snapshot tests for the listing text blocks

use spaces_core::format::entries_block;
use spaces_core::{ListKind, ObjectEntry, Region};

fn entry(key: &str, modified: &str, etag: &str) -> ObjectEntry {
    let mut entry = ObjectEntry::new(key);
    entry.last_modified = Some(modified.parse().unwrap());
    entry.etag = Some(etag.to_string());
    entry.owner = Some("alice".to_string());
    entry
}

#[test]
fn test_all_listing_block() {
    let entries = vec![
        entry(
            "photos/",
            "2024-03-01T12:00:00Z",
            "d41d8cd98f00b204e9800998ecf8427e",
        ),
        entry(
            "photos/cat.png",
            "2024-03-02T08:30:15Z",
            "9b2cf535f27731c974343645a3985328",
        ),
    ];

    let block = entries_block(Region::Nyc3, "media", ListKind::All, &entries);
    insta::assert_snapshot!("all_listing_block", block);
}
