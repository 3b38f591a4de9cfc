//! End-to-end checks: real files on disk, loaded concurrently, then resolved
//! the way the console does it.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use hymn_projector::error::Source;
use hymn_projector::{
    load_library, load_song, resolve_passage, ContentKind, LoadError, LookupError,
    PresentationState, Reference,
};

const HYMNAL: &str = "\
## SDAH export
## number#$#title#$#...#$#lyrics
1#$#Praise to the Lord#$#a#$#b#$#c#$#d#$#Verse 1@%Praise to the Lord, the Almighty@$Refrain@%Praise ye the Lord
12#$#Amazing Grace#$#a#$#b#$#c#$#d#$#Verse 1@%Amazing grace! how sweet the sound@$Verse 2@%'Twas grace that taught
n/a#$#Broken Record#$#a#$#b#$#c#$#d#$#skipped
42#$#
";

const VERSES: &str = r##"{
    "John 3:16": "# For God so loved the world",
    "John 3:17": "For God sent not his Son into the world",
    "John 3:19": "And this is the condemnation"
}"##;

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("SDAH.sps"), HYMNAL).expect("write hymnal");
    fs::write(dir.path().join("verses-1769.json"), VERSES).expect("write verses");
    dir
}

#[test]
fn hymnal_file_parses_into_catalog() {
    let dir = data_dir();
    let report = load_library(
        &dir.path().join("SDAH.sps"),
        &dir.path().join("verses-1769.json"),
    );
    assert!(report.is_ready());

    let songs = &report.library.songs;
    let numbers: Vec<u32> = songs.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 12, 42]);

    let praise = songs.get(1).expect("hymn 1");
    assert_eq!(
        praise.lyrics,
        "Praise to the Lord, the Almighty\n\nPraise ye the Lord"
    );
    assert_eq!(songs.get(42).map(|s| s.title.as_str()), Some("Unknown Title"));
}

#[test]
fn passage_with_gap_resolves_every_line() {
    let dir = data_dir();
    let report = load_library(
        &dir.path().join("SDAH.sps"),
        &dir.path().join("verses-1769.json"),
    );

    let reference = Reference::from_inputs("John", "3", "16", "19").expect("valid reference");
    let content = resolve_passage(&report.library.verses, &reference, "KJV");

    assert_eq!(content.kind, ContentKind::Verse);
    assert_eq!(content.citation, "John 3:16-19 (KJV)");
    assert_eq!(
        content.text.split('\n').collect::<Vec<_>>(),
        vec![
            "For God so loved the world",
            "For God sent not his Son into the world",
            "[John 3:18 not found]",
            "And this is the condemnation",
        ]
    );
    assert_eq!(
        report.library.verses.get("John 3:16"),
        Some("# For God so loved the world")
    );
}

#[test]
fn song_loads_are_repeatable_and_misses_do_not_overwrite() {
    let dir = data_dir();
    let report = load_library(
        &dir.path().join("SDAH.sps"),
        &dir.path().join("verses-1769.json"),
    );
    let songs = &report.library.songs;

    let mut state = PresentationState::default();
    state.load(load_song(songs, "12").expect("hymn 12"));
    let first = state.clone();
    state.load(load_song(songs, "12").expect("hymn 12"));
    assert_eq!(state, first);

    assert_eq!(load_song(songs, "500"), Err(LookupError::SongNotFound(500)));
    assert_eq!(state, first);
}

#[test]
fn invalid_verse_json_fails_only_that_source() {
    let dir = data_dir();
    fs::write(dir.path().join("verses-1769.json"), r#"{"John 3:16": ["nested"]}"#)
        .expect("overwrite verses");

    let report = load_library(
        &dir.path().join("SDAH.sps"),
        &dir.path().join("verses-1769.json"),
    );
    assert!(!report.is_ready());
    assert!(report.failed(Source::Verses));
    assert!(matches!(report.failures[0], LoadError::ParseVerses { .. }));
    assert_eq!(report.library.songs.len(), 3);
    assert!(report.library.verses.is_empty());
}
