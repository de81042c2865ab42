use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode};
use crate::models::{DisplayMode, FilterType};
use crate::storage::KeyValueStore;

pub fn ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);
    match app.state.display_mode() {
        DisplayMode::Tasks => render_tasks(f, app, chunks[2]),
        DisplayMode::Notes => render_notes(f, app, chunks[2]),
    }
    render_status(f, app, chunks[3]);

    let help_key = match (app.input_mode, app.state.display_mode()) {
        (InputMode::Normal, DisplayMode::Tasks) => "hintsTasks",
        (InputMode::Normal, DisplayMode::Notes) => "hintsNotes",
        _ => "hintsInput",
    };
    let help = Paragraph::new(app.state.translate(help_key))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[4]);

    if app.input_mode != InputMode::Normal {
        render_input(f, app);
    }
}

fn render_header<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let state = &app.state;
    let title = Line::from(vec![
        Span::styled(state.translate("appTitle"), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(format!("[{}]", state.language().code()), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" {}", state.translate("switchLanguage")), Style::default().fg(Color::DarkGray)),
    ]);
    let subtitle = Line::from(state.translate("appSubtitle"));
    let header = Paragraph::new(vec![title, subtitle])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_tabs<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let state = &app.state;
    let mode = state.display_mode();
    let tab = |label: String, active: bool, color: Color| {
        if active {
            Span::styled(label, Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };
    let mut spans = vec![
        tab(format!(" {} ({}) ", state.translate("tasks"), state.task_counts().all), mode == DisplayMode::Tasks, Color::Blue),
        Span::raw(" "),
        tab(format!(" {} ({}) ", state.translate("notes"), state.notes().len()), mode == DisplayMode::Notes, Color::Yellow),
    ];

    if mode == DisplayMode::Tasks {
        let counts = state.task_counts();
        spans.push(Span::raw("    "));
        for filter in FilterType::ALL {
            let label = format!(" {} ({}) ", state.translate(filter.label_key()), counts.for_filter(filter));
            spans.push(tab(label, state.filter() == filter, Color::White));
        }
    }

    let tabs = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, hint: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn render_tasks<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let state = &app.state;
    let tasks = state.filtered_tasks();
    if tasks.is_empty() {
        let (title, hint) = state.empty_state_keys();
        render_empty(f, area, state.translate(title), state.translate(hint));
        return;
    }

    let rows: Vec<Row> = tasks
        .iter()
        .map(|t| {
            let (mark, style) = if t.completed {
                ("[x]", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("[ ]", Style::default())
            };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(t.text.clone()),
                Cell::from(t.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
            ]).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(17),
    ];

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["", state.translate("columnText"), state.translate("columnUpdated")])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(state.translate("tasks")))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.task_state);
}

fn render_notes<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let state = &app.state;
    if state.notes().is_empty() {
        render_empty(f, area, state.translate("noNotes"), state.translate("addFirstNote"));
        return;
    }

    let rows: Vec<Row> = state
        .notes()
        .as_slice()
        .iter()
        .map(|n| {
            Row::new(vec![
                Cell::from(n.text.clone()),
                Cell::from(n.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
            ])
        })
        .collect();

    let widths = [Constraint::Min(20), Constraint::Length(17)];

    let table = Table::new(rows, widths)
        .header(Row::new(vec![state.translate("columnText"), state.translate("columnUpdated")])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(state.translate("notesTitle")))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.note_state);
}

fn render_status<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let state = &app.state;
    let line = if state.storage_error().is_some() {
        Line::from(Span::styled(state.translate("storageUnavailable"), Style::default().fg(Color::Red)))
    } else if state.display_mode() == DisplayMode::Tasks {
        Line::from(state.remaining_label().unwrap_or_default())
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_input<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let area = centered_rect(60, 3, f.area());
    f.render_widget(Clear, area);

    let key = match (app.input_mode, app.state.display_mode()) {
        (InputMode::Adding, DisplayMode::Tasks) => "addTaskPlaceholder",
        (InputMode::Adding, DisplayMode::Notes) => "addNotePlaceholder",
        (InputMode::Editing, DisplayMode::Tasks) => "editTask",
        (InputMode::Editing, DisplayMode::Notes) => "editNote",
        (InputMode::Normal, _) => "",
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(app.state.translate(key)));
    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
