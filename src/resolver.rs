//! Turns operator requests into [`CurrentContent`]. Everything here is a pure
//! function of the loaded tables: the caller decides what to do with the
//! result, so a failed lookup can never touch presentation state.

use crate::books::canonical_book;
use crate::error::LookupError;
use crate::library::VerseStore;
use crate::models::{ContentKind, CurrentContent, Reference, SongCatalog, MAX_PASSAGE_VERSES};

/// Title shown above every scripture passage.
pub const SCRIPTURE_TITLE: &str = "Scripture Reading";
/// Translation label appended to citations unless configured otherwise.
pub const DEFAULT_TRANSLATION: &str = "KJV";

impl Reference {
    /// Validate raw operator input. Book, chapter, and start verse are
    /// required; an empty or non-numeric end verse means a single verse.
    pub fn from_inputs(
        book: &str,
        chapter: &str,
        start_verse: &str,
        end_verse: &str,
    ) -> Result<Self, LookupError> {
        let (book_raw, chapter_raw, start_raw) = (book.trim(), chapter.trim(), start_verse.trim());
        if book_raw.is_empty() || chapter_raw.is_empty() || start_raw.is_empty() {
            return Err(LookupError::MissingReference);
        }

        let book = canonical_book(book_raw)
            .ok_or_else(|| LookupError::UnknownBook(book_raw.to_string()))?;
        let chapter = positive(chapter_raw).ok_or(LookupError::InvalidChapter)?;
        let start = positive(start_raw).ok_or(LookupError::InvalidVerse)?;
        let end = positive(end_verse.trim()).unwrap_or(start);
        if end < start {
            return Err(LookupError::ReversedRange { start, end });
        }
        if end - start >= MAX_PASSAGE_VERSES {
            return Err(LookupError::RangeTooLong {
                max: MAX_PASSAGE_VERSES,
            });
        }

        Reference::new(book, chapter, start, end).ok_or(LookupError::InvalidVerse)
    }
}

fn positive(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|value| *value > 0)
}

/// Drop one leading `#` marker and the whitespace after it.
fn strip_marker(text: &str) -> &str {
    match text.strip_prefix('#') {
        Some(rest) => rest.trim_start(),
        None => text,
    }
}

/// Resolve every verse in the reference, in order. Missing verses become an
/// inline `[Book C:V not found]` line so the rest of the range still shows.
pub fn resolve_passage(
    store: &VerseStore,
    reference: &Reference,
    translation: &str,
) -> CurrentContent {
    let lines: Vec<String> = (reference.start_verse..=reference.end_verse)
        .map(|verse| {
            let key = reference.verse_key(verse);
            match store.get(&key) {
                Some(text) if !text.is_empty() => strip_marker(text).to_string(),
                _ => format!("[{key} not found]"),
            }
        })
        .collect();

    CurrentContent {
        kind: ContentKind::Verse,
        title: SCRIPTURE_TITLE.to_string(),
        text: lines.join("\n"),
        citation: format!("{} ({translation})", reference.label()),
    }
}

/// Look up a hymn by the number the operator typed.
pub fn load_song(catalog: &SongCatalog, input: &str) -> Result<CurrentContent, LookupError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(LookupError::MissingSongNumber);
    }
    let number = raw
        .parse::<u32>()
        .map_err(|_| LookupError::InvalidSongNumber(raw.to_string()))?;
    let song = catalog
        .get(number)
        .ok_or(LookupError::SongNotFound(number))?;

    Ok(CurrentContent {
        kind: ContentKind::Song,
        title: format!("Hymn #{number}"),
        text: song.lyrics.clone(),
        citation: song.title.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{PresentationState, SongEntry};

    fn store(pairs: &[(&str, &str)]) -> VerseStore {
        VerseStore::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    fn catalog() -> SongCatalog {
        vec![SongEntry {
            number: 12,
            title: "Amazing Grace".into(),
            lyrics: "Text\n\nMore".into(),
        }]
        .into_iter()
        .collect()
    }

    #[test]
    fn single_verse_strips_marker() {
        let store = store(&[("John 3:16", "#For God so loved...")]);
        let reference = Reference::from_inputs("John", "3", "16", "16").unwrap();
        let content = resolve_passage(&store, &reference, DEFAULT_TRANSLATION);
        assert_eq!(content.text, "For God so loved...");
        assert_eq!(content.citation, "John 3:16 (KJV)");
        assert_eq!(content.title, "Scripture Reading");
        assert_eq!(content.kind, ContentKind::Verse);
    }

    #[test]
    fn marker_with_whitespace_is_stripped_once() {
        assert_eq!(strip_marker("#  In the beginning"), "In the beginning");
        assert_eq!(strip_marker("##Twice"), "#Twice");
        assert_eq!(strip_marker("No marker"), "No marker");
    }

    #[test]
    fn missing_verse_becomes_placeholder() {
        let store = store(&[("Psalms 23:1", "The LORD is my shepherd"), ("Psalms 23:3", "He restoreth")]);
        let reference = Reference::from_inputs("Psalms", "23", "1", "3").unwrap();
        let content = resolve_passage(&store, &reference, "KJV");
        let lines: Vec<&str> = content.text.lines().collect();
        assert_eq!(
            lines,
            vec!["The LORD is my shepherd", "[Psalms 23:2 not found]", "He restoreth"]
        );
        assert_eq!(content.citation, "Psalms 23:1-3 (KJV)");
    }

    #[test]
    fn every_missing_subset_keeps_line_count() {
        let all = ["Mark 1:1", "Mark 1:2", "Mark 1:3", "Mark 1:4"];
        for mask in 0u8..16 {
            let present: Vec<(&str, &str)> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, key)| (*key, "text"))
                .collect();
            let content = resolve_passage(
                &store(&present),
                &Reference::new("Mark", 1, 1, 4).unwrap(),
                "KJV",
            );
            let lines: Vec<&str> = content.text.split('\n').collect();
            assert_eq!(lines.len(), 4);
            for (i, line) in lines.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    assert_eq!(*line, "text");
                } else {
                    assert_eq!(*line, format!("[Mark 1:{} not found]", i + 1));
                }
            }
        }
    }

    #[test]
    fn empty_verse_text_counts_as_missing() {
        let store = store(&[("Jude 1:1", "")]);
        let content = resolve_passage(&store, &Reference::new("Jude", 1, 1, 1).unwrap(), "KJV");
        assert_eq!(content.text, "[Jude 1:1 not found]");
    }

    #[test]
    fn end_verse_defaults_to_start() {
        let reference = Reference::from_inputs("john", "3", "16", "").unwrap();
        assert_eq!(reference.book, "John");
        assert_eq!(reference.end_verse, 16);
        let reference = Reference::from_inputs("John", "3", "16", "abc").unwrap();
        assert_eq!(reference.end_verse, 16);
    }

    #[test]
    fn reference_validation_errors() {
        assert_eq!(
            Reference::from_inputs("", "3", "16", ""),
            Err(LookupError::MissingReference)
        );
        assert_eq!(
            Reference::from_inputs("John", "", "16", ""),
            Err(LookupError::MissingReference)
        );
        assert_eq!(
            Reference::from_inputs("Johnny", "3", "16", ""),
            Err(LookupError::UnknownBook("Johnny".into()))
        );
        assert_eq!(
            Reference::from_inputs("John", "x", "16", ""),
            Err(LookupError::InvalidChapter)
        );
        assert_eq!(
            Reference::from_inputs("John", "3", "0", ""),
            Err(LookupError::InvalidVerse)
        );
        assert_eq!(
            Reference::from_inputs("John", "3", "16", "10"),
            Err(LookupError::ReversedRange { start: 16, end: 10 })
        );
    }

    #[test]
    fn oversized_range_is_rejected_before_resolving() {
        assert_eq!(
            Reference::from_inputs("John", "3", "1", "4000000000"),
            Err(LookupError::RangeTooLong { max: 176 })
        );
        let psalm = Reference::from_inputs("Psalms", "119", "1", "176").expect("whole psalm");
        let content = resolve_passage(&VerseStore::new(), &psalm, "KJV");
        assert_eq!(content.text.split('\n').count(), 176);
    }

    #[test]
    fn custom_translation_label() {
        let content = resolve_passage(
            &VerseStore::new(),
            &Reference::new("Ruth", 1, 16, 17).unwrap(),
            "ASV",
        );
        assert_eq!(content.citation, "Ruth 1:16-17 (ASV)");
    }

    #[test]
    fn song_lookup_builds_content() {
        let content = load_song(&catalog(), " 12 ").unwrap();
        assert_eq!(content.kind, ContentKind::Song);
        assert_eq!(content.title, "Hymn #12");
        assert_eq!(content.text, "Text\n\nMore");
        assert_eq!(content.citation, "Amazing Grace");
    }

    #[test]
    fn song_lookup_is_idempotent() {
        let catalog = catalog();
        let mut state = PresentationState::default();
        state.load(load_song(&catalog, "12").unwrap());
        let first = state.clone();
        state.load(load_song(&catalog, "12").unwrap());
        assert_eq!(state, first);
    }

    #[test]
    fn unknown_song_leaves_state_unchanged() {
        let catalog = catalog();
        let mut state = PresentationState::default();
        state.load(load_song(&catalog, "12").unwrap());
        let before = state.clone();

        match load_song(&catalog, "999") {
            Ok(content) => state.load(content),
            Err(err) => assert_eq!(err, LookupError::SongNotFound(999)),
        }
        assert_eq!(state, before);
    }

    #[test]
    fn song_input_validation() {
        assert_eq!(load_song(&catalog(), "  "), Err(LookupError::MissingSongNumber));
        assert_eq!(
            load_song(&catalog(), "twelve"),
            Err(LookupError::InvalidSongNumber("twelve".into()))
        );
    }
}
