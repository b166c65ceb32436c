use crate::app::{App, OptionRow};
use anon_core::{parse_marked, Backend, Phase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw<B: Backend>(f: &mut Frame, app: &App<B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    if app.browser.is_some() {
        draw_browser(f, app, chunks[1]);
    } else {
        match app.session.phase() {
            Phase::Reviewing | Phase::Finalizing => draw_review(f, app, chunks[1]),
            Phase::Displayed => draw_result(f, app, chunks[1]),
            _ => draw_compose(f, app, chunks[1]),
        }
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_header<B: Backend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let title = format!(
        "anon - Text Anonymiser  [level: {} | mode: {}]",
        app.level, app.mode
    );
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_compose<B: Backend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let text = if app.input_buffer.is_empty() {
        "Type or paste the text to anonymise.\n\nCtrl+f picks a .txt/.pdf/.docx file to upload instead.".to_string()
    } else {
        app.input_buffer.clone()
    };

    let style = if app.input_buffer.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Input text "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_review<B: Backend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Length(4), // Entity
            Constraint::Min(0),    // Options
        ])
        .split(area);

    let (position, total) = app.session.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(position as f64 / total.max(1) as f64)
        .label(format!("Entity {position} of {total}"));
    f.render_widget(gauge, chunks[0]);

    if let Some(step) = app.session.current_step() {
        let variants = step.text_to_replace.join(", ");
        let entity = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(
                    step.display_text.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", step.label),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(Span::styled(
                format!("appears as: {variants}"),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Detected entity "));
        f.render_widget(entity, chunks[1]);

        let mut items: Vec<ListItem> = Vec::new();
        items.push(option_item(
            format!("Keep original ({})", step.display_text),
            app.highlight == OptionRow::KeepOriginal,
            app.session.is_selected(&step.display_text),
        ));
        for (i, suggestion) in step.suggestions.iter().enumerate() {
            items.push(option_item(
                suggestion.clone(),
                app.highlight == OptionRow::Suggestion(i),
                app.session.is_selected(suggestion),
            ));
        }
        let custom_label = if app.custom_buffer.is_empty() {
            "Custom: (type to enter)".to_string()
        } else {
            format!("Custom: {}", app.custom_buffer)
        };
        items.push(option_item(
            custom_label,
            app.highlight == OptionRow::Custom,
            app.highlight == OptionRow::Custom && !app.custom_buffer.is_empty(),
        ));

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Replacement "),
        );
        f.render_widget(list, chunks[2]);
    }
}

fn option_item(label: String, highlighted: bool, selected: bool) -> ListItem<'static> {
    let marker = if selected { "●" } else { "○" };
    let line = format!("{marker} {label}");
    let style = if highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(line).style(style)
}

fn draw_result<B: Backend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Anonymised text
            Constraint::Length(4), // Save / downloads
        ])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(output) = app.session.output() {
        for raw_line in output.anonymized_text_highlighted.lines() {
            let spans: Vec<Span> = parse_marked(raw_line)
                .into_iter()
                .map(|segment| {
                    if segment.highlighted {
                        Span::styled(
                            segment.text,
                            Style::default().bg(Color::Yellow).fg(Color::Black),
                        )
                    } else {
                        Span::raw(segment.text)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }
    }
    let result = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Anonymised text "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(result, chunks[0]);

    let actions = if let Some(receipt) = &app.receipt {
        let mut lines = vec![Line::from(Span::styled(
            "Report saved.",
            Style::default().fg(Color::Green),
        ))];
        if let Some(record_id) = &receipt.record_id {
            let downloads = anon_core::DownloadFormat::ALL
                .iter()
                .map(|format| app.backend.download_url(record_id, *format))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(Line::from(downloads));
        } else if let Some(url) = &receipt.redirect_url {
            lines.push(Line::from(format!("View at: {url}")));
        }
        lines
    } else if app.session.can_save() {
        vec![Line::from(vec![
            Span::styled("s", Style::default().fg(Color::Yellow)),
            Span::raw(" saves this report to the server"),
        ])]
    } else {
        vec![Line::from(Span::styled(
            "Nothing to save",
            Style::default().fg(Color::DarkGray),
        ))]
    };
    let save = Paragraph::new(actions)
        .block(Block::default().borders(Borders::ALL).title(" Save "));
    f.render_widget(save, chunks[1]);
}

fn draw_browser<B: Backend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let Some(browser) = &app.browser else {
        return;
    };

    let visible_height = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = browser
        .entries
        .iter()
        .enumerate()
        .skip(browser.scroll_offset)
        .take(visible_height)
        .map(|(i, entry)| {
            let prefix = if entry.is_dir { "▸ " } else { "  " };
            let line = format!("{prefix}{}", entry.name);
            let style = if i == browser.selected_index {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if entry.is_dir {
                Style::default().fg(Color::Blue)
            } else if entry.is_supported() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(" Upload document - {} ", browser.current_dir.display());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_footer<B: Backend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let error = app.session.error().map(|e| e.to_string());
    let status = error
        .clone()
        .or_else(|| app.status_message.clone())
        .unwrap_or_else(|| "Ready".to_string());

    let status_span = if error.is_some() {
        Span::styled(status, Style::default().fg(Color::Red))
    } else {
        Span::raw(status)
    };

    let mut help_text = vec![status_span, Span::raw(" | ")];
    let hints: &[(&str, &str)] = if app.browser.is_some() {
        &[
            ("enter", "open/upload"),
            ("j/k", "move"),
            (".", "hidden"),
            ("esc", "back"),
        ]
    } else {
        match app.session.phase() {
            Phase::Reviewing | Phase::Finalizing => &[
                ("←/→", "step"),
                ("↑/↓", "choose"),
                ("type", "custom"),
                ("enter", "next/finalise"),
                ("esc", "abandon"),
            ],
            Phase::Displayed => &[("s", "save"), ("n", "new"), ("q", "quit")],
            _ => &[
                ("ctrl+s", "anonymise"),
                ("ctrl+f", "file"),
                ("ctrl+l", "level"),
                ("ctrl+o", "mode"),
                ("ctrl+u", "clear"),
                ("esc", "quit"),
            ],
        }
    };
    for (key, action) in hints {
        help_text.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        help_text.push(Span::raw(format!(":{action} ")));
    }

    let footer = Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
