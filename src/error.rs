//! Typed failures for the data layer. The `Display` strings double as the
//! messages shown in the console footer, so keep them short and readable.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which startup resource a load error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Songs,
    Verses,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Songs => write!(f, "song"),
            Source::Verses => write!(f, "Bible"),
        }
    }
}

/// Fatal failure to obtain one of the two startup resources. Either source
/// failing leaves that side of the library empty.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load {source_kind} data from {}", path.display())]
    Read {
        source_kind: Source,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse Bible data in {}", path.display())]
    ParseVerses {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Loader thread for {0} data panicked")]
    Worker(Source),
}

impl LoadError {
    pub fn source_kind(&self) -> Source {
        match self {
            LoadError::Read { source_kind, .. } => *source_kind,
            LoadError::ParseVerses { .. } => Source::Verses,
            LoadError::Worker(source) => *source,
        }
    }
}

/// Operator-facing lookup failures. None of these mutate presentation state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a song number.")]
    MissingSongNumber,

    #[error("\"{0}\" is not a valid song number.")]
    InvalidSongNumber(String),

    #[error("Song #{0} not found.")]
    SongNotFound(u32),

    #[error("Please fill in Book, Chapter, and Start Verse.")]
    MissingReference,

    #[error("Unknown book \"{0}\".")]
    UnknownBook(String),

    #[error("Chapter must be a positive number.")]
    InvalidChapter,

    #[error("Start verse must be a positive number.")]
    InvalidVerse,

    #[error("End verse must not be before start verse ({start} > {end}).")]
    ReversedRange { start: u32, end: u32 },

    #[error("A passage can span at most {max} verses.")]
    RangeTooLong { max: u32 },
}
