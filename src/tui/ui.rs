use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputField, InputMode, LoginField, Screen};

pub fn ui(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Login => render_login(f, app),
        Screen::Tasks => render_tasks(f, app),
    }
}

fn render_login(f: &mut Frame, app: &App) {
    let area = centered_rect(50, 10, f.area());
    f.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title("tudu - Log In");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Error
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let username = Paragraph::new(app.username.as_str())
        .style(field_style(app.login_field == LoginField::Username))
        .block(Block::default().borders(Borders::ALL).title("Username"));
    f.render_widget(username, chunks[0]);

    let masked = "*".repeat(app.password.chars().count());
    let password = Paragraph::new(masked)
        .style(field_style(app.login_field == LoginField::Password))
        .block(Block::default().borders(Borders::ALL).title("Password"));
    f.render_widget(password, chunks[1]);

    if let Some(err) = &app.login_error {
        let error = Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[2]);
    }

    let help = Paragraph::new("Tab: Switch Field | Enter: Log In | Esc: Quit")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[3]);
}

fn render_tasks(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress gauge
            Constraint::Length(3), // Search / view options
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let progress = app.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .label(format!("{:.1}% completed", progress * 100.0))
        .ratio(progress);
    f.render_widget(gauge, chunks[0]);

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let options_line = format!(
        "{}  [sort: {} | filter: {}]",
        app.search,
        app.sort.label(),
        app.filter.label()
    );
    let search = Paragraph::new(options_line)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(search, chunks[1]);

    let rows: Vec<Row> = app
        .visible
        .iter()
        .map(|t| {
            let style = if t.completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(t.title.clone()),
                Cell::from(t.description.clone().unwrap_or_default()),
                Cell::from(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
                Cell::from(if t.completed { "Done" } else { "Pending" }),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Title", "Description", "Due", "Status"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title("tudu - Tasks"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[2], &mut app.state);

    let help_text = match app.input_mode {
        InputMode::Normal => {
            "q: Quit | a: Add | Space: Toggle Done | d: Del | n: Title | i: Desc | t: Due | /: Search | s: Sort | f: Filter | l: Logout"
        }
        InputMode::Search => "Type to search | Enter: Done | Esc: Clear",
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);

    // Render input box if needed
    if matches!(app.input_mode, InputMode::Editing | InputMode::Adding) {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.input_mode {
            InputMode::Adding => match app.add_state.step {
                0 => "Add Task: Enter Title",
                1 => "Add Task: Enter Description (Optional)",
                2 => "Add Task: Enter Due Date (YYYY-MM-DD, Optional)",
                _ => "Add Task",
            },
            InputMode::Editing => match app.input_field {
                InputField::Title => "Edit Title",
                InputField::Description => "Edit Description",
                InputField::Due => "Edit Due Date (YYYY-MM-DD)",
                InputField::None => "Edit",
            },
            _ => "",
        };

        let style = if app.input_error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let text = match &app.input_error {
            Some(err) => format!("{}  ({})", app.input_buffer, err),
            None => app.input_buffer.clone(),
        };
        let input = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(input, area);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
