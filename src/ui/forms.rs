use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::books::book_suggestion;
use crate::error::LookupError;
use crate::models::Reference;

/// Number of typed characters before the book autocomplete kicks in.
const SUGGESTION_MIN_CHARS: usize = 2;

/// Form state for the scripture tab, including book autocomplete tracking.
#[derive(Default, Clone)]
pub(crate) struct VerseForm {
    pub(crate) book: String,
    pub(crate) chapter: String,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) active: VerseField,
    pub(crate) error: Option<String>,
    pub(crate) suggestion: Option<&'static str>,
    pub(crate) autocomplete_disabled: bool,
}

/// Enumerates the fields within the verse form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum VerseField {
    #[default]
    Book,
    Chapter,
    Start,
    End,
}

impl VerseField {
    pub(crate) const ALL: [VerseField; 4] = [
        VerseField::Book,
        VerseField::Chapter,
        VerseField::Start,
        VerseField::End,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            VerseField::Book => "Book",
            VerseField::Chapter => "Chapter",
            VerseField::Start => "Start Verse",
            VerseField::End => "End Verse",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            VerseField::End => "<optional>",
            _ => "<required>",
        }
    }

    /// Row offset of the field inside the form.
    pub(crate) fn row(self) -> u16 {
        match self {
            VerseField::Book => 0,
            VerseField::Chapter => 1,
            VerseField::Start => 2,
            VerseField::End => 3,
        }
    }
}

impl VerseForm {
    /// Move focus forward, wrapping from End back to Book.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            VerseField::Book => VerseField::Chapter,
            VerseField::Chapter => VerseField::Start,
            VerseField::Start => VerseField::End,
            VerseField::End => VerseField::Book,
        };
        self.update_suggestion();
    }

    /// Move focus backward, wrapping from Book to End.
    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            VerseField::Book => VerseField::End,
            VerseField::Chapter => VerseField::Book,
            VerseField::Start => VerseField::Chapter,
            VerseField::End => VerseField::Start,
        };
        self.update_suggestion();
    }

    /// Insert a character into the active field. Number fields only take
    /// digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            VerseField::Book => {
                self.autocomplete_disabled = false;
                self.book.push(ch);
            }
            field => {
                if !ch.is_ascii_digit() {
                    return false;
                }
                self.value_mut(field).push(ch);
            }
        }
        self.error = None;
        self.update_suggestion();
        true
    }

    /// Remove a character from the active field.
    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
        if field == VerseField::Book {
            self.autocomplete_disabled = false;
        }
        self.update_suggestion();
    }

    /// Validate the inputs into a reference ready for resolution.
    pub(crate) fn parse_inputs(&self) -> Result<Reference, LookupError> {
        Reference::from_inputs(&self.book, &self.chapter, &self.start, &self.end)
    }

    /// Refresh the book autocomplete suggestion based on current input.
    pub(crate) fn update_suggestion(&mut self) {
        if self.active != VerseField::Book
            || self.autocomplete_disabled
            || self.book.chars().count() < SUGGESTION_MIN_CHARS
        {
            self.suggestion = None;
            return;
        }

        self.suggestion = book_suggestion(&self.book).filter(|candidate| {
            !(candidate.chars().count() == self.book.chars().count()
                && candidate.eq_ignore_ascii_case(&self.book))
        });
    }

    /// Apply the suggested book, marking autocomplete as satisfied.
    pub(crate) fn accept_suggestion(&mut self) -> bool {
        if self.suggestion_suffix().is_none() {
            return false;
        }
        match self.suggestion.take() {
            Some(candidate) => {
                self.book = candidate.to_string();
                self.autocomplete_disabled = true;
                true
            }
            None => false,
        }
    }

    /// Explicitly disable autocomplete for the rest of this interaction.
    pub(crate) fn cancel_autocomplete(&mut self) -> bool {
        if self.has_active_suggestion() {
            self.autocomplete_disabled = true;
            self.suggestion = None;
            return true;
        }
        false
    }

    /// Whether a ghosted book suggestion is currently shown.
    pub(crate) fn has_active_suggestion(&self) -> bool {
        self.active == VerseField::Book && self.suggestion.is_some()
    }

    /// Remaining characters of the suggestion past what was typed.
    pub(crate) fn suggestion_suffix(&self) -> Option<String> {
        let candidate = self.suggestion?;
        let suffix: String = candidate.chars().skip(self.book.chars().count()).collect();
        if suffix.is_empty() {
            None
        } else {
            Some(suffix)
        }
    }

    pub(crate) fn value(&self, field: VerseField) -> &str {
        match field {
            VerseField::Book => &self.book,
            VerseField::Chapter => &self.chapter,
            VerseField::Start => &self.start,
            VerseField::End => &self.end,
        }
    }

    fn value_mut(&mut self, field: VerseField) -> &mut String {
        match field {
            VerseField::Book => &mut self.book,
            VerseField::Chapter => &mut self.chapter,
            VerseField::Start => &mut self.start,
            VerseField::End => &mut self.end,
        }
    }

    /// Character length of the requested field.
    pub(crate) fn value_len(&self, field: VerseField) -> usize {
        self.value(field).chars().count()
    }

    /// Render a styled line for one field, appending the ghosted book
    /// suggestion when there is one.
    pub(crate) fn build_line(&self, field: VerseField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let mut spans = vec![Span::raw(format!("{}: ", field.label()))];
        if value.is_empty() && !is_active {
            spans.push(Span::styled(field.placeholder(), style));
        } else {
            spans.push(Span::styled(value.to_string(), style));
        }
        if field == VerseField::Book && is_active {
            if let Some(suffix) = self.suggestion_suffix() {
                spans.push(Span::styled(suffix, Style::default().fg(Color::DarkGray)));
            }
        }

        Line::from(spans)
    }
}
