use crate::models::{SongCatalog, SongEntry};

/// Which half of the operator console is active.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Tab {
    Songs,
    Scripture,
}

impl Tab {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Tab::Songs => Tab::Scripture,
            Tab::Scripture => Tab::Songs,
        }
    }
}

/// State for the Songs tab: the typed hymn number plus a browsable list of
/// the catalog. Moving the selection copies the hymn number into the input.
pub(crate) struct SongBrowser {
    pub(crate) songs: Vec<SongEntry>,
    pub(crate) selected: usize,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl SongBrowser {
    pub(crate) fn new(catalog: &SongCatalog) -> Self {
        Self {
            songs: catalog.iter().cloned().collect(),
            selected: 0,
            input: String::new(),
            error: None,
        }
    }

    /// Swap in a freshly loaded catalog, keeping the typed number.
    pub(crate) fn set_catalog(&mut self, catalog: &SongCatalog) {
        self.songs = catalog.iter().cloned().collect();
        self.ensure_in_bounds();
    }

    pub(crate) fn current_song(&self) -> Option<&SongEntry> {
        self.songs.get(self.selected)
    }

    pub(crate) fn push_digit(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            self.input.push(ch);
            self.error = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.songs.is_empty() {
            return;
        }
        let len = self.songs.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
        self.sync_input();
    }

    pub(crate) fn select_first(&mut self) {
        if !self.songs.is_empty() {
            self.selected = 0;
            self.sync_input();
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.songs.is_empty() {
            self.selected = self.songs.len() - 1;
            self.sync_input();
        }
    }

    fn sync_input(&mut self) {
        if let Some(number) = self.current_song().map(|song| song.number) {
            self.input = number.to_string();
            self.error = None;
        }
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.songs.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.songs.len() {
            self.selected = self.songs.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SongCatalog {
        [1, 12, 100]
            .into_iter()
            .map(|number| SongEntry {
                number,
                title: format!("Song {number}"),
                lyrics: String::new(),
            })
            .collect()
    }

    #[test]
    fn moving_selection_fills_input() {
        let mut browser = SongBrowser::new(&catalog());
        assert!(browser.input.is_empty());
        browser.move_selection(1);
        assert_eq!(browser.input, "12");
        browser.move_selection(10);
        assert_eq!(browser.input, "100");
        browser.move_selection(-10);
        assert_eq!(browser.input, "1");
    }

    #[test]
    fn input_accepts_digits_only() {
        let mut browser = SongBrowser::new(&catalog());
        assert!(browser.push_digit('4'));
        assert!(!browser.push_digit('x'));
        browser.backspace();
        assert!(browser.input.is_empty());
    }

    #[test]
    fn empty_catalog_is_safe() {
        let mut browser = SongBrowser::new(&SongCatalog::new());
        browser.move_selection(1);
        browser.select_last();
        assert!(browser.current_song().is_none());
        assert!(browser.input.is_empty());
    }

    #[test]
    fn shrinking_catalog_clamps_selection() {
        let mut browser = SongBrowser::new(&catalog());
        browser.select_last();
        let smaller: SongCatalog = catalog().iter().take(1).cloned().collect();
        browser.set_catalog(&smaller);
        assert_eq!(browser.selected, 0);
    }
}
