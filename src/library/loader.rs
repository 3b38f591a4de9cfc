use std::fs;
use std::path::Path;
use std::thread;

use tracing::{error, info};

use crate::error::{LoadError, Source};
use crate::models::SongCatalog;

use super::hymnal::parse_hymnal;
use super::verses::VerseStore;

/// Both lookup tables, owned and immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub songs: SongCatalog,
    pub verses: VerseStore,
}

/// Outcome of a startup load. A failed source leaves its table empty and
/// records the error; the other table is still usable.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub library: Library,
    pub failures: Vec<LoadError>,
}

impl LoadReport {
    /// Ready only when both sources loaded.
    pub fn is_ready(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, source: Source) -> bool {
        self.failures.iter().any(|err| err.source_kind() == source)
    }
}

/// Read and parse the hymnal file.
pub fn load_songs(path: &Path) -> Result<SongCatalog, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        source_kind: Source::Songs,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_hymnal(&text))
}

/// Read and parse the verse JSON file. Any failure discards the whole store.
pub fn load_verses(path: &Path) -> Result<VerseStore, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Read {
        source_kind: Source::Verses,
        path: path.to_path_buf(),
        source,
    })?;
    VerseStore::from_json_str(&json).map_err(|source| LoadError::ParseVerses {
        path: path.to_path_buf(),
        source,
    })
}

/// Load both sources concurrently and wait for both before returning.
pub fn load_library(songs_path: &Path, verses_path: &Path) -> LoadReport {
    info!(
        songs = %songs_path.display(),
        verses = %verses_path.display(),
        "loading library"
    );

    let (songs, verses) = thread::scope(|scope| {
        let songs = scope.spawn(|| load_songs(songs_path));
        let verses = scope.spawn(|| load_verses(verses_path));
        (
            songs
                .join()
                .unwrap_or(Err(LoadError::Worker(Source::Songs))),
            verses
                .join()
                .unwrap_or(Err(LoadError::Worker(Source::Verses))),
        )
    });

    let mut report = LoadReport::default();

    match songs {
        Ok(catalog) => {
            info!(count = catalog.len(), "loaded hymnal");
            report.library.songs = catalog;
        }
        Err(err) => {
            error!(error = %err, "hymnal failed to load");
            report.failures.push(err);
        }
    }

    match verses {
        Ok(store) => {
            info!(count = store.len(), "loaded verse store");
            report.library.verses = store;
        }
        Err(err) => {
            error!(error = %err, "verse store failed to load");
            report.failures.push(err);
        }
    }

    report
}
