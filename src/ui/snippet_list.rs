//! Snippet Browser Screen
//!
//! The single screen of the application: search input, tag bar, the filtered
//! snippet list and a preview of the selected snippet's metadata and code.

use crate::app::{App, InputMode, LoadState};
use crate::models::Snippet;
use crate::ui::colors::RosePine;
use crate::ui::components::{
    render_bottom_bar, render_help_overlay, render_message_bar, truncate_to_width,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, app: &App) {
    let main_area = frame.area();

    let block = Block::bordered()
        .title(" Snippfy ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH));

    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search input
        Constraint::Length(3), // Tag bar
        Constraint::Fill(1),   // List + preview
        Constraint::Length(3), // Bottom bar
    ])
    .split(inner_area);

    render_search_input(frame, chunks[0], app);
    render_tag_bar(frame, chunks[1], app);

    match &app.load_state {
        LoadState::Loading => render_centered_notice(
            frame,
            chunks[2],
            "Loading...",
            Style::default().fg(RosePine::SUBTLE).italic(),
        ),
        LoadState::Failed(error) => render_load_error(frame, chunks[2], error),
        LoadState::Ready(_) => {
            let content = Layout::horizontal([
                Constraint::Percentage(40), // Results list
                Constraint::Percentage(60), // Preview
            ])
            .split(chunks[2]);

            render_results(frame, content[0], app);
            render_preview(frame, content[1], app);
        }
    }

    render_bottom_bar(frame, chunks[3], app);

    if let Some(error) = &app.error_message {
        render_message_bar(frame, chunks[2], error, true);
    } else if let Some(success) = &app.success_message {
        render_message_bar(frame, chunks[2], success, false);
    }

    if app.input_mode == InputMode::HelpMenu {
        render_help_overlay(frame, main_area);
    }
}

fn render_search_input(frame: &mut Frame, area: Rect, app: &App) {
    let searching = app.input_mode == InputMode::Search;
    let border_color = if searching {
        RosePine::IRIS
    } else {
        RosePine::HIGHLIGHT_HIGH
    };

    let input_block = Block::bordered()
        .title("  Search ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(border_color).bg(RosePine::SURFACE));

    let text = if app.query.search_text.is_empty() && !searching {
        Span::styled(
            " Start searching... (press / to type)",
            Style::default().fg(RosePine::MUTED).italic(),
        )
    } else {
        Span::styled(
            format!(" {}", app.query.search_text),
            Style::default()
                .fg(RosePine::GOLD)
                .add_modifier(Modifier::BOLD),
        )
    };

    Paragraph::new(Line::from(text))
        .block(input_block)
        .render(area, frame.buffer_mut());

    if searching {
        frame.set_cursor_position(Position {
            x: search_cursor_x(area, &app.query.search_text),
            y: area.y + 1,
        });
    }
}

/// Column right after the typed text, kept inside the input's border
fn search_cursor_x(area: Rect, text: &str) -> u16 {
    let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(2)
        .saturating_add(text_width)
        .min(area.right().saturating_sub(2))
}

fn render_tag_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    let all_style = if app.query.selected_tag.is_none() {
        Style::default().fg(RosePine::BASE).bg(RosePine::TEXT).bold()
    } else {
        Style::default().fg(RosePine::SUBTLE)
    };
    spans.push(Span::styled(" All ", all_style));

    for (i, tag) in app.vocabulary.tags().iter().enumerate() {
        let color = app.palette.color_for(tag);
        let is_selected = app.query.selected_tag.as_deref() == Some(tag.as_str());
        let has_cursor = i == app.tag_cursor && app.input_mode == InputMode::Normal;

        let mut style = if is_selected {
            Style::default().fg(RosePine::BASE).bg(color).bold()
        } else {
            Style::default().fg(color)
        };
        if has_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", tag), style));
    }

    let block = Block::bordered()
        .title(" 󰓹 Tags ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH));

    Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, frame.buffer_mut());
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible_snippets();

    let block = Block::bordered()
        .title(format!(" Results ({}) ", visible.len()))
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::SUBTLE).bg(RosePine::SURFACE));

    if visible.is_empty() {
        let inner = block.inner(area);
        block.render(area, frame.buffer_mut());
        render_centered_notice(
            frame,
            inner,
            "No snippets found.",
            Style::default().fg(RosePine::MUTED),
        );
        return;
    }

    let text_width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, snippet)| result_item(snippet, i == app.selected_result, text_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(RosePine::HIGHLIGHT_MED))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_result));

    frame.render_stateful_widget(list, area, &mut state);
}

fn result_item(snippet: &Snippet, is_selected: bool, width: usize) -> ListItem<'static> {
    let language = snippet.language_kind();

    let title_style = if is_selected {
        Style::default().fg(RosePine::LOVE).bold()
    } else {
        Style::default().fg(RosePine::TEXT)
    };

    let label = format!("{} {}", language.icon(), snippet.title);
    let short = format!(" [{}]", language.short_name());
    let title_width = width.saturating_sub(short.width());

    let title_line = Line::from(vec![
        Span::styled(truncate_to_width(&label, title_width), title_style),
        Span::styled(short, Style::default().fg(RosePine::MUTED)),
    ]);

    let description_line = Line::from(Span::styled(
        truncate_to_width(&format!("  {}", snippet.description), width),
        Style::default().fg(RosePine::SUBTLE).italic(),
    ));

    ListItem::new(vec![title_line, description_line])
}

fn render_preview(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered()
        .title("  Preview ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::SUBTLE).bg(RosePine::SURFACE));

    let Some(snippet) = app.selected_snippet() else {
        block.render(area, frame.buffer_mut());
        return;
    };

    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let sections = Layout::vertical([Constraint::Length(8), Constraint::Fill(1)]).split(inner);

    Paragraph::new(metadata_lines(snippet, app))
        .wrap(Wrap { trim: true })
        .render(sections[0], frame.buffer_mut());

    let code_block = Block::bordered()
        .title(" 󰅩 Code ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH).bg(RosePine::BASE));

    let number_width = snippet.line_count().max(1).to_string().len();
    let code_lines: Vec<Line> = snippet
        .code
        .lines()
        .enumerate()
        .map(|(i, line)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>width$} │ ", i + 1, width = number_width),
                    Style::default().fg(RosePine::MUTED),
                ),
                Span::styled(line.to_string(), Style::default().fg(RosePine::TEXT)),
            ])
        })
        .collect();

    Paragraph::new(code_lines)
        .block(code_block)
        .scroll((app.preview_scroll, 0))
        .render(sections[1], frame.buffer_mut());
}

fn metadata_lines(snippet: &Snippet, app: &App) -> Vec<Line<'static>> {
    let language = snippet.language_kind();

    let mut tag_spans = vec![Span::styled("Tags: ", Style::default().fg(RosePine::MUTED))];
    if snippet.tags.is_empty() {
        tag_spans.push(Span::styled("none", Style::default().fg(RosePine::MUTED)));
    }
    for tag in &snippet.tags {
        tag_spans.push(Span::styled(
            format!("#{} ", tag),
            Style::default().fg(app.palette.color_for(tag)),
        ));
    }

    let mut author_spans = vec![Span::styled(
        "Added by: ",
        Style::default().fg(RosePine::MUTED),
    )];
    match &snippet.author.profile_url {
        Some(url) => {
            author_spans.push(Span::styled(
                snippet.author.display_name().to_string(),
                Style::default().fg(RosePine::IRIS).underlined(),
            ));
            author_spans.push(Span::styled(
                format!(" ({})", url),
                Style::default().fg(RosePine::MUTED),
            ));
        }
        None => author_spans.push(Span::styled(
            snippet.author.display_name().to_string(),
            Style::default().fg(RosePine::SUBTLE),
        )),
    }

    let added = snippet
        .added_on()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| snippet.added_at.clone());

    let description = if snippet.description.trim().is_empty() {
        "No description.".to_string()
    } else {
        snippet.description.clone()
    };

    vec![
        Line::from(vec![
            Span::styled(language.icon(), Style::default().fg(RosePine::GOLD)),
            Span::raw(" "),
            Span::styled(
                snippet.title.clone(),
                Style::default().fg(RosePine::TEXT).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Language: ", Style::default().fg(RosePine::MUTED)),
            Span::styled(
                language.display_name().to_string(),
                Style::default().fg(RosePine::FOAM),
            ),
        ]),
        Line::from(tag_spans),
        Line::from(author_spans),
        Line::from(vec![
            Span::styled("Added: ", Style::default().fg(RosePine::MUTED)),
            Span::styled(added, Style::default().fg(RosePine::TEXT)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            description,
            Style::default().fg(RosePine::SUBTLE),
        )),
    ]
}

fn render_load_error(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::bordered()
        .title(" ✗ Could not load snippets ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::LOVE));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(RosePine::TEXT),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Check the source with --source or in config.toml, then restart.",
            Style::default().fg(RosePine::MUTED).italic(),
        )),
    ];

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, frame.buffer_mut());
}

fn render_centered_notice(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let rows = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(style)
        .render(rows[1], frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppSettings;
    use crate::clipboard::MemoryClipboard;
    use crate::models::{Author, SnippetCollection, SnippetSource, TagVocabulary};
    use crate::ui::colors::TagPalette;
    use ratatui::{Terminal, backend::TestBackend};

    fn settings() -> AppSettings {
        AppSettings {
            source: SnippetSource::parse("data.json"),
            vocabulary: TagVocabulary::default(),
            tags_from_data: false,
            palette: TagPalette::default(),
        }
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn ready_screen_lists_snippets_and_preview() {
        let collection = SnippetCollection::new(vec![
            Snippet::new("1", "Git rebase")
                .with_tags(["Git"])
                .with_code("git rebase -i HEAD~3")
                .with_author(Author::with_profile("chefharun", "https://github.com/chefharun")),
        ]);
        let app = App::with_collection(settings(), collection, Box::new(MemoryClipboard::default()));

        let text = screen_text(&app);
        assert!(text.contains("Git rebase"));
        assert!(text.contains("git rebase -i HEAD~3"));
        assert!(text.contains("chefharun"));
        assert!(text.contains("Web Development"));
    }

    #[test]
    fn empty_result_shows_no_results_notice() {
        let collection = SnippetCollection::new(vec![Snippet::new("1", "Git rebase")]);
        let mut app =
            App::with_collection(settings(), collection, Box::new(MemoryClipboard::default()));
        for c in "zzz".chars() {
            app.push_search_char(c);
        }

        assert!(screen_text(&app).contains("No snippets found."));
    }

    #[test]
    fn search_cursor_stays_inside_the_input() {
        let area = Rect::new(1, 1, 118, 3);
        assert_eq!(search_cursor_x(area, ""), 3);
        assert_eq!(search_cursor_x(area, "git"), 6);
        assert_eq!(search_cursor_x(area, &"a".repeat(65_534)), area.right() - 2);
        assert_eq!(search_cursor_x(area, &"a".repeat(70_000)), area.right() - 2);
    }

    #[test]
    fn very_long_search_text_renders() {
        let collection = SnippetCollection::new(vec![Snippet::new("1", "Git rebase")]);
        let mut app =
            App::with_collection(settings(), collection, Box::new(MemoryClipboard::default()));
        app.input_mode = InputMode::Search;
        app.query.search_text = "a".repeat(65_534);
        app.apply_filter();

        assert!(screen_text(&app).contains("No snippets found."));
    }
}
