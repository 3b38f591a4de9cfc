//! Domain models shared by the loaders, the resolver, and the operator
//! console. These stay plain data holders: parsing lives in `library`, lookup
//! rules live in `resolver`, and the UI only reads them.

use std::collections::BTreeMap;
use std::fmt;

use crate::books::canonical_book;

/// Longest range a single reference may span. Psalm 119 has 176 verses.
pub const MAX_PASSAGE_VERSES: u32 = 176;

/// One hymn parsed from the hymnal file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    /// Hymn number as printed in the hymnal. Always positive.
    pub number: u32,
    /// Title shown as the citation when the hymn is loaded.
    pub title: String,
    /// Lyrics with paragraph breaks preserved and stanza labels removed.
    pub lyrics: String,
}

/// All hymns keyed by number. A `BTreeMap` keeps the browser list in hymnal
/// order without a separate sort step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongCatalog {
    songs: BTreeMap<u32, SongEntry>,
}

impl SongCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same number.
    pub fn insert(&mut self, entry: SongEntry) {
        self.songs.insert(entry.number, entry);
    }

    pub fn get(&self, number: u32) -> Option<&SongEntry> {
        self.songs.get(&number)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Iterate entries in ascending hymn number.
    pub fn iter(&self) -> impl Iterator<Item = &SongEntry> {
        self.songs.values()
    }
}

impl FromIterator<SongEntry> for SongCatalog {
    fn from_iter<I: IntoIterator<Item = SongEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

/// A validated passage request. For values built through [`Reference::new`]
/// or `Reference::from_inputs`, `book` is a canonical book name,
/// `end_verse >= start_verse`, and the range spans at most
/// [`MAX_PASSAGE_VERSES`] verses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: u32,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl Reference {
    /// Build a reference from already-typed parts. The book is matched
    /// case-insensitively and stored in canonical spelling. Returns `None` for
    /// an unknown book, a zero number, a backwards range, or a range longer
    /// than [`MAX_PASSAGE_VERSES`].
    pub fn new(book: &str, chapter: u32, start_verse: u32, end_verse: u32) -> Option<Self> {
        let book = canonical_book(book)?;
        if chapter == 0 || start_verse == 0 || end_verse < start_verse {
            return None;
        }
        if end_verse - start_verse >= MAX_PASSAGE_VERSES {
            return None;
        }
        Some(Self {
            book: book.to_string(),
            chapter,
            start_verse,
            end_verse,
        })
    }

    /// Lookup key for a single verse inside this reference's chapter.
    pub fn verse_key(&self, verse: u32) -> String {
        format!("{} {}:{}", self.book, self.chapter, verse)
    }

    /// `Book C:S` or `Book C:S-E` when the range spans several verses.
    pub fn label(&self) -> String {
        let mut label = format!("{} {}:{}", self.book, self.chapter, self.start_verse);
        if self.end_verse != self.start_verse {
            label.push_str(&format!("-{}", self.end_verse));
        }
        label
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What kind of material is currently staged for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Song,
    Verse,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Song => write!(f, "song"),
            ContentKind::Verse => write!(f, "verse"),
        }
    }
}

/// The record both the preview panel and the projection view render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentContent {
    pub kind: ContentKind,
    pub title: String,
    pub text: String,
    pub citation: String,
}

/// Single last-write-wins slot holding whatever the operator loaded last.
/// Nothing transitions back to `Empty` once content is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PresentationState {
    #[default]
    Empty,
    Loaded(CurrentContent),
}

impl PresentationState {
    /// Replace the staged content with a freshly resolved one.
    pub fn load(&mut self, content: CurrentContent) {
        *self = PresentationState::Loaded(content);
    }

    pub fn current(&self) -> Option<&CurrentContent> {
        match self {
            PresentationState::Empty => None,
            PresentationState::Loaded(content) => Some(content),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PresentationState::Loaded(_))
    }
}
