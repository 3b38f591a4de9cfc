use std::cell::Cell;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::config::Settings;
use crate::library::{load_library, Library, LoadReport};
use crate::models::{CurrentContent, PresentationState};
use crate::resolver::{load_song, resolve_passage};

use super::forms::{VerseField, VerseForm};
use super::helpers::{centered_rect, key_hint, text_lines, vertical_center, wrapped_height};
use super::screens::{SongBrowser, Tab};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Header rows: tab strip plus the bottom border.
const HEADER_HEIGHT: u16 = 2;
/// Rows moved by PageUp/PageDown in lists and the projection view.
const PAGE_STEP: isize = 10;

/// Top-level views. The projection hides the whole console.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Screen {
    Console,
    Projection { scroll: u16 },
}

/// Availability of the startup data, shown as a badge in the header.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum LoadStatus {
    Loading,
    Ready,
    Error,
}

impl LoadStatus {
    fn badge(&self) -> Span<'static> {
        match self {
            LoadStatus::Loading => {
                Span::styled("Loading data...", Style::default().fg(Color::Yellow))
            }
            LoadStatus::Ready => Span::styled("Ready", Style::default().fg(Color::Green)),
            LoadStatus::Error => Span::styled("Error", Style::default().fg(Color::Red)),
        }
    }
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state for the operator console.
pub struct App {
    settings: Settings,
    library: Library,
    load_status: LoadStatus,
    tab: Tab,
    songs: SongBrowser,
    verse_form: VerseForm,
    presentation: PresentationState,
    screen: Screen,
    preview_visible: bool,
    status: Option<StatusMessage>,
    /// Width of the projection body at the last draw. Starts unbounded, so
    /// each text line counts as one row until the first frame is drawn.
    projection_width: Cell<u16>,
}

impl App {
    /// Create the console with empty tables. Data arrives through
    /// [`App::load_data`], which `run_app` calls after the first frame.
    pub fn new(settings: Settings) -> Self {
        let library = Library::default();
        let songs = SongBrowser::new(&library.songs);
        Self {
            settings,
            library,
            load_status: LoadStatus::Loading,
            tab: Tab::Songs,
            songs,
            verse_form: VerseForm::default(),
            presentation: PresentationState::default(),
            screen: Screen::Console,
            preview_visible: false,
            status: None,
            projection_width: Cell::new(u16::MAX),
        }
    }

    /// Content staged for preview and projection.
    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    /// Whether the startup load has not run yet.
    pub fn is_loading(&self) -> bool {
        self.load_status == LoadStatus::Loading
    }

    /// Read both data files from the configured paths and swap them in.
    pub fn load_data(&mut self) {
        let report = load_library(&self.settings.songs_path, &self.settings.verses_path);
        self.apply_report(report);
    }

    pub(crate) fn apply_report(&mut self, report: LoadReport) {
        let LoadReport { library, failures } = report;
        self.library = library;
        self.songs.set_catalog(&self.library.songs);

        if failures.is_empty() {
            self.load_status = LoadStatus::Ready;
            self.set_status(
                format!(
                    "Loaded {} hymns and {} verses.",
                    self.library.songs.len(),
                    self.library.verses.len()
                ),
                StatusKind::Info,
            );
        } else {
            self.load_status = LoadStatus::Error;
            let message = failures
                .iter()
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            self.set_status(message, StatusKind::Error);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        match self.screen {
            Screen::Projection { scroll } => self.handle_projection_key(code, scroll),
            Screen::Console => {
                if code == KeyCode::F(5) {
                    self.open_projection();
                    return Ok(false);
                }
                match self.tab {
                    Tab::Songs => self.handle_songs_key(code, &mut exit),
                    Tab::Scripture => self.handle_scripture_key(code),
                }
            }
        }
        Ok(exit)
    }

    fn handle_projection_key(&mut self, code: KeyCode, scroll: u16) {
        let scroll = match code {
            KeyCode::Esc => {
                self.close_projection();
                return;
            }
            KeyCode::Up => scroll.saturating_sub(1),
            KeyCode::Down => scroll.saturating_add(1),
            KeyCode::PageUp => scroll.saturating_sub(PAGE_STEP as u16),
            KeyCode::PageDown => scroll.saturating_add(PAGE_STEP as u16),
            KeyCode::Home => 0,
            _ => scroll,
        };
        let scroll = scroll.min(self.max_projection_scroll(self.projection_width.get()));
        self.screen = Screen::Projection { scroll };
    }

    /// Last scroll offset that still leaves one row of text on screen.
    fn max_projection_scroll(&self, width: u16) -> u16 {
        self.presentation
            .current()
            .map(|content| wrapped_height(&content.text, width).saturating_sub(1))
            .unwrap_or(0)
    }

    fn handle_songs_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Char(ch) => {
                self.songs.push_digit(ch);
            }
            KeyCode::Backspace => self.songs.backspace(),
            KeyCode::Up => self.songs.move_selection(-1),
            KeyCode::Down => self.songs.move_selection(1),
            KeyCode::PageUp => self.songs.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.songs.move_selection(PAGE_STEP),
            KeyCode::Home => self.songs.select_first(),
            KeyCode::End => self.songs.select_last(),
            KeyCode::Enter => self.load_song_from_input(),
            KeyCode::Esc => {
                self.preview_visible = false;
                self.clear_status();
            }
            _ => {}
        }
    }

    fn handle_scripture_key(&mut self, code: KeyCode) {
        let form = &mut self.verse_form;
        match code {
            KeyCode::Esc => {
                if !form.cancel_autocomplete() {
                    self.preview_visible = false;
                    self.clear_status();
                }
            }
            KeyCode::Tab => {
                let consumed = form.has_active_suggestion() && form.accept_suggestion();
                if !consumed {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Down => form.next_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => self.load_passage(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
    }

    /// Ctrl+T: switch between the Songs and Scripture tabs.
    pub(crate) fn handle_ctrl_t(&mut self) -> Result<()> {
        if self.screen == Screen::Console {
            self.tab = self.tab.toggle();
            self.preview_visible = false;
            self.clear_status();
        }
        Ok(())
    }

    /// Ctrl+P: project whatever is currently staged.
    pub(crate) fn handle_ctrl_p(&mut self) -> Result<()> {
        if self.screen == Screen::Console {
            self.open_projection();
        }
        Ok(())
    }

    /// Ctrl+R: re-read both data files. Staged content is left alone.
    pub(crate) fn handle_ctrl_r(&mut self) -> Result<()> {
        info!("reloading library");
        self.load_data();
        Ok(())
    }

    fn load_song_from_input(&mut self) {
        match load_song(&self.library.songs, &self.songs.input) {
            Ok(content) => {
                self.songs.error = None;
                self.stage(content);
            }
            Err(err) => {
                let message = err.to_string();
                warn!(input = %self.songs.input, %err, "song lookup failed");
                self.songs.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn load_passage(&mut self) {
        match self.verse_form.parse_inputs() {
            Ok(reference) => {
                let content =
                    resolve_passage(&self.library.verses, &reference, &self.settings.translation);
                self.verse_form.error = None;
                self.stage(content);
            }
            Err(err) => {
                let message = err.to_string();
                self.verse_form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    /// Overwrite the presentation slot and show the preview.
    fn stage(&mut self, content: CurrentContent) {
        info!(kind = %content.kind, citation = %content.citation, "staged content");
        self.set_status(
            format!("Loaded {}: {}.", content.title, content.citation),
            StatusKind::Info,
        );
        self.presentation.load(content);
        self.preview_visible = true;
    }

    fn open_projection(&mut self) {
        if self.presentation.is_loaded() {
            self.screen = Screen::Projection { scroll: 0 };
            self.clear_status();
        } else {
            self.set_status("Load a hymn or passage before projecting.", StatusKind::Error);
        }
    }

    fn close_projection(&mut self) {
        self.screen = Screen::Console;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        if let Screen::Projection { scroll } = self.screen {
            if let Some(content) = self.presentation.current() {
                self.draw_projection(frame, area, content, scroll);
                return;
            }
        }

        let footer_height = FOOTER_HEIGHT.min(area.height);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        match self.tab {
            Tab::Songs => self.draw_songs_tab(frame, columns[0]),
            Tab::Scripture => self.draw_scripture_tab(frame, columns[0]),
        }
        self.draw_preview(frame, columns[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::BOTTOM);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tab_style = |tab: Tab| {
            if self.tab == tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            }
        };

        let tabs = Line::from(vec![
            Span::styled(" Hymns & Scripture ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(" Songs ", tab_style(Tab::Songs)),
            Span::raw(" "),
            Span::styled(" Scripture ", tab_style(Tab::Scripture)),
        ]);
        frame.render_widget(Paragraph::new(tabs), inner);

        let badge = Paragraph::new(Line::from(self.load_status.badge())).alignment(Alignment::Right);
        frame.render_widget(badge, inner);
    }

    fn draw_songs_tab(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let block = Block::default().title("Hymn Number").borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let prefix = "Number: ";
        let mut lines = vec![Line::from(vec![
            Span::raw(prefix),
            Span::styled(self.songs.input.clone(), Style::default().fg(Color::Yellow)),
        ])];
        if let Some(error) = &self.songs.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
        if self.screen == Screen::Console && inner.height > 0 {
            frame.set_cursor_position((
                inner.x + prefix.len() as u16 + self.songs.input.chars().count() as u16,
                inner.y,
            ));
        }

        let list_block = Block::default().title("Hymnal").borders(Borders::ALL);
        if self.songs.songs.is_empty() {
            let message = Paragraph::new("No hymns loaded.")
                .block(list_block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .songs
            .songs
            .iter()
            .map(|song| ListItem::new(format!("{:>4}  {}", song.number, song.title)))
            .collect();
        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.songs.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_scripture_tab(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Passage").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let form = &self.verse_form;
        let mut lines: Vec<Line> = VerseField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Citations use the {} translation.", self.settings.translation),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let active = form.active;
        let prefix = format!("{}: ", active.label()).len() as u16;
        if self.screen == Screen::Console && inner.height > active.row() {
            frame.set_cursor_position((
                inner.x + prefix + form.value_len(active) as u16,
                inner.y + active.row(),
            ));
        }
    }

    fn draw_preview(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Preview").borders(Borders::ALL);

        let content = match self.presentation.current() {
            Some(content) if self.preview_visible => content,
            _ => {
                let hint = Paragraph::new("Load a hymn or passage to preview it.")
                    .block(block)
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true });
                frame.render_widget(hint, area);
                return;
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(
                content.citation.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(text_lines(&content.text));

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_projection(&self, frame: &mut Frame, area: Rect, content: &CurrentContent, scroll: u16) {
        let backdrop = Block::default().style(Style::default().bg(Color::Black).fg(Color::White));
        frame.render_widget(backdrop, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            content.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, chunks[0]);

        let body_area = centered_rect(90, 100, chunks[1]);
        self.projection_width.set(body_area.width);
        let scroll = scroll.min(self.max_projection_scroll(body_area.width));
        let body_area = vertical_center(body_area, wrapped_height(&content.text, body_area.width));
        let body = Paragraph::new(text_lines(&content.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0));
        frame.render_widget(body, body_area);

        let citation = Paragraph::new(Line::from(Span::styled(
            content.citation.clone(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(citation, chunks[2]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let mut spans = Vec::new();
        match self.tab {
            Tab::Songs => {
                spans.extend(key_hint("0-9", "Number"));
                spans.extend(key_hint("↑↓", "Browse"));
                spans.extend(key_hint("Enter", "Load"));
                spans.extend(key_hint("Ctrl+T", "Scripture"));
            }
            Tab::Scripture => {
                spans.extend(key_hint("Tab", "Next/Complete"));
                spans.extend(key_hint("Enter", "Load"));
                spans.extend(key_hint("Ctrl+T", "Songs"));
            }
        }
        spans.extend(key_hint("F5/Ctrl+P", "Project"));
        spans.extend(key_hint("Ctrl+R", "Reload"));
        spans.extend(key_hint("Ctrl+Q", "Quit"));
        Line::from(spans)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
