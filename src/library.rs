//! Startup data: the hymnal catalog and the verse store, plus the loader that
//! reads both from disk.

mod hymnal;
mod loader;
mod verses;

pub use hymnal::{parse_hymnal, parse_record};
pub use loader::{load_library, load_songs, load_verses, Library, LoadReport};
pub use verses::VerseStore;
