pub mod app;
pub mod ui;

use std::{error::Error, io};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use app::{App, InputField, InputMode, Screen};
use ui::ui;

pub fn run_tui() -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state; the store restore happens here, before first render
    let mut app = App::new();

    // Run loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.screen {
                Screen::Login => match key.code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.login_switch_field(),
                    KeyCode::Enter => app.login_submit(),
                    KeyCode::Char(c) => app.login_push(c),
                    KeyCode::Backspace => app.login_pop(),
                    _ => {}
                },
                Screen::Tasks => match app.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.next(),
                        KeyCode::Up | KeyCode::Char('k') => app.previous(),
                        KeyCode::Char(' ') => app.toggle_selected(),
                        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                        KeyCode::Char('a') => app.start_add(),
                        KeyCode::Char('n') => app.start_edit(InputField::Title),
                        KeyCode::Char('i') => app.start_edit(InputField::Description),
                        KeyCode::Char('t') => app.start_edit(InputField::Due),
                        KeyCode::Char('/') => app.start_search(),
                        KeyCode::Char('s') => app.cycle_sort(),
                        KeyCode::Char('f') => app.cycle_filter(),
                        KeyCode::Char('l') => app.logout(),
                        _ => {}
                    },
                    InputMode::Search => match key.code {
                        KeyCode::Enter => app.input_mode = InputMode::Normal,
                        KeyCode::Esc => app.clear_search(),
                        KeyCode::Char(c) => app.search_push(c),
                        KeyCode::Backspace => app.search_pop(),
                        _ => {}
                    },
                    InputMode::Editing | InputMode::Adding => match key.code {
                        KeyCode::Enter => app.handle_input(),
                        KeyCode::Esc => app.cancel_input(),
                        KeyCode::Char(c) => {
                            app.input_buffer.push(c);
                        }
                        KeyCode::Backspace => {
                            app.input_buffer.pop();
                        }
                        _ => {}
                    },
                },
            }
        }
    }
}
