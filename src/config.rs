//! Command-line options and the resolved settings the console runs with.
//!
//! Each data file is located in this order:
//! 1. Explicit flag or environment variable (`--songs`, `--verses`)
//! 2. `--data-dir` / `HYMN_PROJECTOR_DATA`
//! 3. The current directory, when the file exists there
//! 4. `~/.hymn-projector/`

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::BaseDirs;

use crate::resolver::DEFAULT_TRANSLATION;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".hymn-projector";
/// Default hymnal file name.
pub const SONGS_FILE_NAME: &str = "SDAH.sps";
/// Default verse table file name.
pub const VERSES_FILE_NAME: &str = "verses-1769.json";
/// Log file written next to the data when no path is given.
const LOG_FILE_NAME: &str = "hymn-projector.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "hymn-projector", version, about = "Project hymns and scripture from the terminal")]
pub struct Cli {
    /// Hymnal file in the `#$#`-separated format
    #[arg(long, env = "HYMN_PROJECTOR_SONGS")]
    pub songs: Option<PathBuf>,

    /// JSON object mapping "Book C:V" to verse text
    #[arg(long, env = "HYMN_PROJECTOR_VERSES")]
    pub verses: Option<PathBuf>,

    /// Directory holding both data files
    #[arg(long, env = "HYMN_PROJECTOR_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Translation label appended to scripture citations
    #[arg(long, default_value = DEFAULT_TRANSLATION)]
    pub translation: String,

    /// Where to write logs (the terminal belongs to the console)
    #[arg(long, env = "HYMN_PROJECTOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub songs_path: PathBuf,
    pub verses_path: PathBuf,
    pub translation: String,
    pub log_path: PathBuf,
}

impl Settings {
    /// Resolve paths against the current directory and the home data folder.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let home = home_data_dir();
        Self::resolve(cli, &cwd, home.as_deref())
    }

    pub(crate) fn resolve(cli: Cli, cwd: &Path, home: Option<&Path>) -> Result<Self> {
        let data_dir = cli.data_dir.as_deref();
        let songs_path = locate(cli.songs, data_dir, cwd, home, SONGS_FILE_NAME)?;
        let verses_path = locate(cli.verses, data_dir, cwd, home, VERSES_FILE_NAME)?;

        let log_path = match cli.log_file {
            Some(path) => path,
            None => match home {
                Some(dir) => dir.join(LOG_FILE_NAME),
                None => cwd.join(LOG_FILE_NAME),
            },
        };

        let translation = cli.translation.trim();
        let translation = if translation.is_empty() {
            DEFAULT_TRANSLATION.to_string()
        } else {
            translation.to_string()
        };

        Ok(Self {
            songs_path,
            verses_path,
            translation,
            log_path,
        })
    }
}

fn locate(
    explicit: Option<PathBuf>,
    data_dir: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
    file_name: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(dir) = data_dir {
        return Ok(dir.join(file_name));
    }
    let local = cwd.join(file_name);
    if local.exists() {
        return Ok(local);
    }
    home.map(|dir| dir.join(file_name))
        .ok_or_else(|| anyhow!("could not locate {file_name}; pass its path explicitly"))
}

/// `~/.hymn-projector`, when a home directory exists.
fn home_data_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DATA_DIR_NAME))
}
