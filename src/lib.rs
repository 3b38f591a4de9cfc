//! Core library surface for the hymn and scripture projector.
//!
//! The data layer (`library`, `resolver`) has no terminal dependencies so it
//! can be tested on its own; `ui` wraps it in a Ratatui console.
pub mod books;
pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod resolver;
pub mod ui;

/// Startup loading and the two lookup tables.
pub use library::{load_library, parse_hymnal, parse_record, Library, LoadReport, VerseStore};

/// Domain types passed between the resolver and the console.
pub use models::{ContentKind, CurrentContent, PresentationState, Reference, SongCatalog, SongEntry};

pub use config::{Cli, Settings};
pub use error::{LoadError, LookupError};
pub use resolver::{load_song, resolve_passage};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
