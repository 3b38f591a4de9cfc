use std::collections::HashMap;

use serde::Deserialize;

/// Verse text keyed by `"<Book> <Chapter>:<Verse>"`. Text is kept exactly as
/// loaded; marker cleanup happens when a passage is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct VerseStore {
    verses: HashMap<String, String>,
}

impl VerseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed mapping.
    pub fn from_map(verses: HashMap<String, String>) -> Self {
        Self { verses }
    }

    /// Parse a JSON object of verse key to verse text. Anything else (arrays,
    /// non-string values) is rejected as a whole. A leading byte order mark
    /// is skipped.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let json = json.strip_prefix('\u{feff}').unwrap_or(json);
        serde_json::from_str(json)
    }

    /// Raw text for one key, exactly as stored.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.verses.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
