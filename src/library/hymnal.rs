use tracing::debug;

use crate::models::{SongCatalog, SongEntry};

/// Separator between fields of a hymnal record.
const FIELD_SEPARATOR: &str = "#$#";
/// Lines starting with this marker are comments, even if they contain the
/// field separator.
const COMMENT_MARKER: &str = "##";
/// Title used when a record leaves the title field blank.
const UNKNOWN_TITLE: &str = "Unknown Title";
/// Index of the lyrics block within a record.
const LYRICS_FIELD: usize = 6;
/// Byte order mark some editors put at the start of UTF-8 exports.
const BOM: char = '\u{feff}';

/// Parse a whole hymnal file. Malformed lines are skipped one by one; the
/// function never fails and returns an empty catalog for empty input. A
/// leading byte order mark is ignored.
pub fn parse_hymnal(text: &str) -> SongCatalog {
    let mut catalog = SongCatalog::new();
    let mut skipped = 0usize;

    let text = text.strip_prefix(BOM).unwrap_or(text);
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !is_record(line) {
            continue;
        }
        match parse_record(line) {
            Some(entry) => catalog.insert(entry),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped hymnal records without a usable song number");
    }
    catalog
}

/// Parse one record line. Returns `None` for comment lines, lines without a
/// separator, and records whose first field does not start with a positive
/// number.
pub fn parse_record(line: &str) -> Option<SongEntry> {
    if !is_record(line) {
        return None;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let number = leading_number(fields.first()?)?;

    let title = match fields.get(1) {
        Some(title) if !title.is_empty() => (*title).to_string(),
        _ => UNKNOWN_TITLE.to_string(),
    };
    let lyrics = fields
        .get(LYRICS_FIELD)
        .map(|raw| clean_lyrics(raw))
        .unwrap_or_default();

    Some(SongEntry {
        number,
        title,
        lyrics,
    })
}

fn is_record(line: &str) -> bool {
    !line.starts_with(COMMENT_MARKER) && line.contains(FIELD_SEPARATOR)
}

/// Read the digits at the start of a field the way hymnal exports expect:
/// leading whitespace is ignored and anything after the digits is dropped.
fn leading_number(field: &str) -> Option<u32> {
    let trimmed = field.trim_start();
    let end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let number = trimmed[..end].parse::<u32>().ok()?;
    (number > 0).then_some(number)
}

/// Expand the inline break tokens, trim, and drop stanza label lines.
pub(crate) fn clean_lyrics(raw: &str) -> String {
    let expanded = raw.replace("@$", "\n\n").replace("@%", "\n");
    strip_stanza_labels(expanded.trim())
}

/// Remove lines that are only `Refrain` or `Verse <n>`. A label is removed
/// together with its newline, so a label on the final line stays put.
fn strip_stanza_labels(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|segment| match segment.strip_suffix('\n') {
            Some(content) => !is_stanza_label(content),
            None => true,
        })
        .collect()
}

fn is_stanza_label(line: &str) -> bool {
    if line == "Refrain" {
        return true;
    }
    match line.strip_prefix("Verse ") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_with_embedded_label_line() {
        let entry = parse_record("12#$#Amazing Grace#$#x#$#x#$#x#$#x#$#Verse 1\nText@$More")
            .expect("record parses");
        assert_eq!(entry.number, 12);
        assert_eq!(entry.title, "Amazing Grace");
        assert_eq!(entry.lyrics, "Text\n\nMore");
    }

    #[test]
    fn comment_lines_are_never_records() {
        assert!(parse_record("##12#$#Hidden#$#x#$#x#$#x#$#x#$#words").is_none());
        let catalog = parse_hymnal("##12#$#Hidden#$#x#$#x#$#x#$#x#$#words\n");
        assert!(catalog.is_empty());
    }

    #[test]
    fn non_numeric_number_is_skipped() {
        let catalog = parse_hymnal("abc#$#Title#$#x#$#x#$#x#$#x#$#words\n7#$#Kept\n");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(7).is_some());
    }

    #[test]
    fn number_parsing_accepts_digit_prefix_only() {
        assert_eq!(leading_number(" 42"), Some(42));
        assert_eq!(leading_number("42a"), Some(42));
        assert_eq!(leading_number("0"), None);
        assert_eq!(leading_number("-3"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn short_records_fall_back_to_defaults() {
        let entry = parse_record("9#$#").expect("record parses");
        assert_eq!(entry.title, "Unknown Title");
        assert_eq!(entry.lyrics, "");

        let entry = parse_record("10#$#Only Title#$#x").expect("record parses");
        assert_eq!(entry.title, "Only Title");
        assert_eq!(entry.lyrics, "");
    }

    #[test]
    fn lyrics_tokens_expand_in_order() {
        assert_eq!(
            clean_lyrics("  Line one@%Line two@$Line three  "),
            "Line one\nLine two\n\nLine three"
        );
    }

    #[test]
    fn all_stanza_labels_are_removed() {
        let raw = "Verse 1@%Amazing grace@$Refrain@%How sweet@$Verse 12@%I once was lost";
        assert_eq!(
            clean_lyrics(raw),
            "Amazing grace\n\nHow sweet\n\nI once was lost"
        );
    }

    #[test]
    fn label_like_text_inside_lines_is_kept() {
        assert_eq!(clean_lyrics("Verse one@%Refrain twice"), "Verse one\nRefrain twice");
        assert_eq!(clean_lyrics("Verse @%x"), "Verse \nx");
        assert_eq!(clean_lyrics("words@%Refrain"), "words\nRefrain");
    }

    #[test]
    fn later_duplicate_wins() {
        let text = "3#$#Old#$#x#$#x#$#x#$#x#$#old words\n3#$#New#$#x#$#x#$#x#$#x#$#new words";
        let catalog = parse_hymnal(text);
        let entry = catalog.get(3).expect("song 3 present");
        assert_eq!(entry.title, "New");
        assert_eq!(entry.lyrics, "new words");
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_record() {
        let catalog = parse_hymnal("\u{feff}1#$#Praise#$#x#$#x#$#x#$#x#$#words\n2#$#Second\n");
        let numbers: Vec<u32> = catalog.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(catalog.get(1).map(|s| s.title.as_str()), Some("Praise"));
    }

    #[test]
    fn windows_line_endings_are_tolerated() {
        let catalog = parse_hymnal("1#$#Title\r\n2#$#Other\r\n");
        assert_eq!(catalog.get(1).map(|s| s.title.as_str()), Some("Title"));
        assert_eq!(catalog.get(2).map(|s| s.title.as_str()), Some("Other"));
    }
}
