//! Terminal drawing and the event loop

use crate::app::{App, Focus, Modal, ModalKind};
use crate::input;
use crate::keymap::KeyMap;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use resume::FormField;
use std::io;
use std::time::Duration;

const ACCENT: Color = Color::Rgb(45, 212, 191);

/// Run the interactive form until the user quits
pub fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
    }
    Ok(())
}

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Resume Builder ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" output: {}", app.output().display()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]));
    f.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    draw_personal(f, app, columns[0]);
    draw_education(f, app, columns[1]);
    draw_status(f, app, rows[2]);

    if let Some(modal) = app.modal() {
        render_modal(f, area, modal);
    }
}

fn field_height(field: FormField) -> u16 {
    match field {
        FormField::Summary => 5,
        FormField::Experience => 7,
        FormField::Skills => 4,
        _ => 3,
    }
}

fn draw_personal(f: &mut Frame, app: &App, area: Rect) {
    let fields = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Summary,
        FormField::Experience,
        FormField::Skills,
    ];
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|f| Constraint::Length(field_height(*f)))
        .collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (field, chunk) in fields.iter().zip(chunks.iter()) {
        draw_field(f, app, *field, *chunk);
    }
    draw_button(f, app, Focus::Generate, "Generate Resume", chunks[fields.len()]);
}

fn draw_education(f: &mut Frame, app: &App, area: Rect) {
    let mut constraints: Vec<Constraint> = FormField::EDUCATION
        .iter()
        .map(|f| Constraint::Length(field_height(*f)))
        .collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (field, chunk) in FormField::EDUCATION.iter().zip(chunks.iter()) {
        draw_field(f, app, *field, *chunk);
    }
    draw_button(f, app, Focus::AddEducation, "Add Education", chunks[4]);

    let rows = app.form.education();
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            ListItem::new(format!(
                "{}. {} | {} | {} | {}",
                i + 1,
                row.degree,
                row.institution,
                row.year,
                row.percentage
            ))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Education ({}) ", rows.len())),
    );
    f.render_widget(list, chunks[5]);
}

fn draw_field(f: &mut Frame, app: &App, field: FormField, area: Rect) {
    let focused = app.focus() == Focus::Field(field);
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut title = vec![Span::styled(
        format!(" {} ", field.label()),
        border_style.add_modifier(Modifier::BOLD),
    )];
    if let Some(hint) = field.hint() {
        title.push(Span::styled(
            format!("({hint}) "),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title));
    let inner = block.inner(area);

    let text = app.form.get(field);
    let (line, column) = input::cursor_position(text, app.cursor(field));
    let scroll = (line as u16).saturating_sub(inner.height.saturating_sub(1));

    let paragraph = Paragraph::new(text).block(block).scroll((scroll, 0));
    f.render_widget(paragraph, area);

    if focused && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (column as u16).min(inner.width - 1);
        let y = inner.y + (line as u16 - scroll).min(inner.height - 1);
        f.set_cursor_position((x, y));
    }
}

fn draw_button(f: &mut Frame, app: &App, focus: Focus, label: &str, area: Rect) {
    let style = if app.focus() == focus {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    };
    let button = Paragraph::new(Span::styled(format!("[ {label} ]"), style))
        .alignment(Alignment::Center);
    f.render_widget(button, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.status() {
        Some(status) => Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let mut spans = Vec::new();
            for (key, desc) in KeyMap::help_text() {
                spans.push(Span::styled(
                    format!(" {key} "),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(format!("{desc} ")));
            }
            Line::from(spans)
        }
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_modal(f: &mut Frame, area: Rect, modal: &Modal) {
    let color = match modal.kind {
        ModalKind::Info => ACCENT,
        ModalKind::Warning => Color::Yellow,
        ModalKind::Error => Color::Red,
    };

    // Center the modal
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical[1]);
    let modal_area = horizontal[1];

    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", modal.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let text = vec![
        Line::from(modal.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    f.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left),
        inner,
    );
}
