// TUI event loop and terminal management
use crate::{App, InputMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use portscout_cache::SessionStore;
use portscout_core::PortCard;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

const WEBSITE_BASE: &str = "https://portmaster.games/";

/// Run the interactive browser until the user quits.
///
/// Every checkbox toggle and every search keystroke re-runs the filter engine
/// and snapshots the filter state to the session store, mirroring the
/// website's change handlers. Everything happens on this one event loop, so
/// filter passes never overlap.
pub async fn run_tui(mut app: App, session: SessionStore, mouse_enabled: bool) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.clear_error();
                match app.input_mode {
                    InputMode::Searching => match key.code {
                        KeyCode::Char(c) => {
                            app.state.search_query.push(c);
                            app.refilter_and_save(&session);
                        }
                        KeyCode::Backspace => {
                            app.state.search_query.pop();
                            app.refilter_and_save(&session);
                        }
                        KeyCode::Esc | KeyCode::Enter => {
                            app.enter_normal_mode();
                        }
                        _ => {}
                    },
                    InputMode::Filtering => match key.code {
                        KeyCode::Esc => {
                            app.enter_normal_mode();
                        }
                        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
                            app.next_filter();
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            app.previous_filter();
                        }
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            if app.toggle_current_entry() {
                                app.refilter_and_save(&session);
                            }
                        }
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => {
                            break;
                        }
                        KeyCode::Char('/') => {
                            app.enter_search_mode();
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            app.toggle_filters();
                            if app.show_filters {
                                app.enter_filter_mode();
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            app.next_result();
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            app.previous_result();
                        }
                        KeyCode::Enter => {
                            // Open the detail page in the browser
                            if let Some((port, filtered)) = app.selected_port() {
                                let card =
                                    PortCard::build(port, &filtered.supported, &app.catalog.devices);
                                let url = format!("{}{}", WEBSITE_BASE, card.detail_url);
                                if let Err(e) = open::that(&url) {
                                    app.error_message =
                                        Some(format!("Failed to open browser: {}", e));
                                }
                            }
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    Ok(())
}
