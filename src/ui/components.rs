//! UI Components and Layout Module
//!
//! Reusable pieces shared by the snippet browser: the bottom status bar,
//! the transient message bar, the help overlay and a few layout helpers.

use crate::app::{App, InputMode, LoadState};
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the bottom bar: collection status on the left, shortcuts on the right
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let left_content = Paragraph::new(status_line(app))
        .alignment(Alignment::Left)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    let right_content = Paragraph::new(context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn status_line(app: &App) -> Line<'static> {
    let mut spans = Vec::new();

    match &app.load_state {
        LoadState::Loading => spans.push(Span::styled(
            format!(" 󰦖 Loading {} ", app.source),
            Style::default().fg(RosePine::GOLD),
        )),
        LoadState::Failed(_) => spans.push(Span::styled(
            " ✗ Load failed ",
            Style::default().fg(RosePine::BASE).bg(RosePine::LOVE),
        )),
        LoadState::Ready(collection) => {
            spans.push(Span::styled(
                format!(" {} / {} snippets ", app.filtered.len(), collection.len()),
                Style::default().fg(RosePine::BASE).bg(RosePine::IRIS),
            ));
            if let Some(tag) = &app.query.selected_tag {
                spans.push(Span::styled(" ❯ ", Style::default().fg(RosePine::MUTED)));
                spans.push(Span::styled(
                    format!("#{}", tag),
                    Style::default().fg(app.palette.color_for(tag)),
                ));
            }
            if app.rejected_count > 0 {
                spans.push(Span::styled(
                    format!("  {} skipped", app.rejected_count),
                    Style::default().fg(RosePine::GOLD),
                ));
            }
        }
    }

    Line::from(spans)
}

fn context_shortcuts(app: &App) -> String {
    match app.input_mode {
        InputMode::Search => " [⏎/Esc] Done │ [Ctrl-U] Clear │ [↑↓] Move ".to_string(),
        InputMode::HelpMenu => " [?/Esc] Close help ".to_string(),
        InputMode::Normal => {
            " [/] Search │ [←→] Tag │ [Space] Toggle │ [y] Copy │ [?] Help │ [q] Quit ".to_string()
        }
    }
}

/// Single-line success / error bar, drawn over the bottom of `area`
pub fn render_message_bar(frame: &mut Frame, area: Rect, message: &str, is_error: bool) {
    let bar = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(3),
        width: area.width,
        height: area.height.min(3),
    };

    Clear.render(bar, frame.buffer_mut());

    let (icon, color) = if is_error {
        ("✗", RosePine::LOVE)
    } else {
        ("✓", RosePine::FOAM)
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(color).bg(RosePine::SURFACE));

    let line = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color).bold()),
        Span::styled(message.to_string(), Style::default().fg(RosePine::TEXT)),
    ]);

    Paragraph::new(line)
        .block(block)
        .render(bar, frame.buffer_mut());
}

/// Centered help popup listing the key bindings
pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    Clear.render(popup, frame.buffer_mut());

    let bindings = [
        ("/  i", "Search (type to filter, Enter/Esc to finish)"),
        ("←  →  h  l", "Move the tag cursor"),
        ("Space  t", "Toggle the tag under the cursor"),
        ("0", "Show all tags"),
        ("↑  ↓  k  j", "Select snippet"),
        ("PgUp  PgDn", "Scroll code preview"),
        ("y  c  Enter", "Copy code to clipboard"),
        ("Esc", "Clear search text"),
        ("?", "Toggle this help"),
        ("q  Ctrl-C", "Quit"),
    ];

    let mut lines = vec![
        Line::from(Span::styled(
            "Keyboard shortcuts",
            Style::default().fg(RosePine::LOVE).bold(),
        )),
        Line::from(""),
    ];
    lines.extend(bindings.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(format!("{:<14}", keys), Style::default().fg(RosePine::GOLD)),
            Span::styled(*action, Style::default().fg(RosePine::TEXT)),
        ])
    }));

    let block = Block::bordered()
        .title("  Help ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::BASE));

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(popup, frame.buffer_mut());
}

/// A rect of the given percentage size centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

/// Cuts `text` to at most `max_width` terminal columns, ending with `…` when shortened
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width - 1 {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push('…');
    result
}
