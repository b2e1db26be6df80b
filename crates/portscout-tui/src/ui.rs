// UI rendering logic
use crate::{App, InputMode};
use portscout_core::PortCard;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search input
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1]);

    let content_chunks = if app.show_filters {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25), // Filter panel
                Constraint::Percentage(35), // Results list
                Constraint::Percentage(40), // Card preview
            ])
            .split(chunks[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Results list
                Constraint::Percentage(60), // Card preview
            ])
            .split(chunks[2])
    };

    if app.show_filters {
        render_filter_panel(frame, app, content_chunks[0]);
        render_results_list(frame, app, content_chunks[1]);
        render_card_preview(frame, app, content_chunks[2]);
    } else {
        render_results_list(frame, app, content_chunks[0]);
        render_card_preview(frame, app, content_chunks[1]);
    }

    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            "PortScout",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} Ports Available", app.port_count),
            Style::default().fg(Color::Green),
        ),
    ]);

    let widget = Paragraph::new(header).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.input_mode == InputMode::Searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let search = Paragraph::new(app.state.search_query.as_str())
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search (press /)"),
        );
    frame.render_widget(search, area);
}

fn render_filter_panel(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .panel
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let line = match app.entry_checked(entry) {
                Some(checked) => {
                    let mark = if checked { "[x]" } else { "[ ]" };
                    let mut style = Style::default();
                    if app.input_mode == InputMode::Filtering && i == app.filter_cursor {
                        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                    }
                    Line::from(Span::styled(format!(" {} {}", mark, entry.label()), style))
                }
                None => Line::from(Span::styled(
                    entry.label().to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
            };
            ListItem::new(line)
        })
        .collect();

    let panel = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filters (space toggles)"),
    );
    frame.render_widget(panel, area);
}

fn render_results_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|filtered| {
            let port = &app.catalog.ports[filtered.index];
            let mut spans = vec![Span::raw(port.attr.title.clone())];
            if port.attr.rtr {
                spans.push(Span::styled(" [RTR]", Style::default().fg(Color::Green)));
            }
            if port.attr.exp {
                spans.push(Span::styled(" [EXP]", Style::default().fg(Color::Red)));
            }
            spans.push(Span::styled(
                format!("  {} dl", port.download_count),
                Style::default().fg(Color::DarkGray),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Ports"))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_card_preview(frame: &mut Frame, app: &App, area: Rect) {
    let Some((port, filtered)) = app.selected_port() else {
        let empty = Paragraph::new("No port selected")
            .block(Block::default().borders(Borders::ALL).title("Card"));
        frame.render_widget(empty, area);
        return;
    };

    let card = PortCard::build(port, &filtered.supported, &app.catalog.devices);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(badges(&card)),
        Line::from(""),
    ];

    // Markdown description rendering is termimad's job, not ours
    let width = area.width.saturating_sub(4).max(20) as usize;
    let skin = termimad::MadSkin::no_style();
    let description = skin.text(&card.description, Some(width)).to_string();
    for desc_line in description.lines() {
        lines.push(Line::from(desc_line.to_string()));
    }

    lines.push(Line::from(""));
    if !card.porters.is_empty() {
        let porter_names: Vec<String> =
            card.porters.iter().map(|p| p.name.clone()).collect();
        lines.push(Line::from(format!("Porter: {}", porter_names.join(", "))));
    }
    if !card.device_details.is_empty() {
        lines.push(Line::from("Supported Devices:"));
        for detail in &card.device_details {
            lines.push(Line::from(format!("  {}", detail)));
        }
    }
    lines.push(Line::from(format!("Added: {}", card.date_added)));
    lines.push(Line::from(format!("Downloads: {}", card.download_count)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        card.image_url.clone(),
        Style::default().fg(Color::DarkGray),
    )));

    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Card"));
    frame.render_widget(preview, area);
}

fn badges(card: &PortCard) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if card.ready_to_run {
        spans.push(Span::styled(
            "Ready to Run ",
            Style::default().fg(Color::Green),
        ));
    }
    if card.experimental {
        spans.push(Span::styled(
            "Experimental ",
            Style::default().fg(Color::Red),
        ));
    }
    if card.multiverse {
        spans.push(Span::styled(
            "Multiverse ",
            Style::default().fg(Color::Magenta),
        ));
    }
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))
    } else {
        let hint = match app.input_mode {
            InputMode::Searching => "type to search | ESC/ENTER: done",
            InputMode::Filtering => "j/k: move | SPACE: toggle | ESC: close",
            InputMode::Normal => {
                "j/k: navigate | /: search | f: filters | ENTER: open | q: quit"
            }
        };
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    };
    frame.render_widget(Paragraph::new(text), area);
}
