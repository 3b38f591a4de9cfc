use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Number of terminal rows `text` needs when wrapped to `width` columns.
/// Counts characters, which is close enough for hymn and verse text.
pub(crate) fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = text
        .split('\n')
        .map(|line| {
            let len = line.chars().count();
            if len == 0 {
                1
            } else {
                len.div_ceil(width)
            }
        })
        .sum();
    rows.min(u16::MAX as usize) as u16
}

/// Shrink `area` vertically to `height` rows, centered.
pub(crate) fn vertical_center(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    }
}

/// Split lyrics or verse text into display lines, keeping blank lines so
/// paragraph breaks survive.
pub(crate) fn text_lines(text: &str) -> Vec<Line<'static>> {
    text.split('\n').map(|line| Line::from(line.to_string())).collect()
}

/// Key hint such as `[Ctrl+P] Project`.
pub(crate) fn key_hint(key: &str, action: &str) -> Vec<Span<'static>> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::styled(format!("[{key}]"), key_style),
        Span::raw(format!(" {action}   ")),
    ]
}
