mod app;
mod file_browser;
mod ui;

pub use app::App;

use anon_core::{Backend, Level, Mode, Phase};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

pub async fn run(
    backend: impl Backend,
    level: Level,
    mode: Mode,
    initial_text: Option<String>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    // Create app state
    let mut app = App::new(backend, level, mode, initial_text);

    // Run the app
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<T: ratatui::backend::Backend, B: Backend>(
    terminal: &mut Terminal<T>,
    app: &mut App<B>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.browser.is_some() {
                let visible_height = (terminal.size()?.height as usize).saturating_sub(8);
                match key.code {
                    KeyCode::Char('j') | KeyCode::Down => {
                        if let Some(browser) = app.browser.as_mut() {
                            browser.next(visible_height);
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        if let Some(browser) = app.browser.as_mut() {
                            browser.previous();
                        }
                    }
                    KeyCode::Enter | KeyCode::Char('l') => {
                        // Directories open; documents upload
                        let entered = match app.browser.as_mut() {
                            Some(browser) => browser.enter_selected()?,
                            None => false,
                        };
                        if !entered {
                            app.upload_selected().await?;
                        }
                    }
                    KeyCode::Char('h') | KeyCode::Backspace => {
                        if let Some(browser) = app.browser.as_mut() {
                            browser.go_up()?;
                        }
                    }
                    KeyCode::Char('.') => {
                        if let Some(browser) = app.browser.as_mut() {
                            browser.toggle_hidden()?;
                        }
                    }
                    KeyCode::Esc => app.close_browser(),
                    _ => {}
                }
                continue;
            }

            match app.session.phase() {
                Phase::Idle | Phase::Loading => {
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    match key.code {
                        KeyCode::Char('s') if ctrl => app.submit().await?,
                        KeyCode::Char('f') if ctrl => app.open_browser()?,
                        KeyCode::Char('l') if ctrl => app.cycle_level(),
                        KeyCode::Char('o') if ctrl => app.cycle_mode(),
                        KeyCode::Char('u') if ctrl => app.clear_input(),
                        KeyCode::Esc => {
                            if app.session.error().is_some() || app.status_message.is_some() {
                                app.dismiss_error();
                            } else {
                                return Ok(());
                            }
                        }
                        KeyCode::Enter => app.input_char('\n'),
                        KeyCode::Backspace => app.input_backspace(),
                        KeyCode::Char(c) => app.input_char(c),
                        _ => {}
                    }
                }
                Phase::Reviewing | Phase::Finalizing => match key.code {
                    KeyCode::Left => app.previous_step(),
                    KeyCode::Right => app.next_step(),
                    KeyCode::Up => app.highlight_up(),
                    KeyCode::Down => app.highlight_down(),
                    KeyCode::Enter => {
                        if app.session.is_last_step() {
                            app.finalize().await?;
                        } else {
                            app.next_step();
                        }
                    }
                    KeyCode::Esc => {
                        if app.session.error().is_some() {
                            app.dismiss_error();
                        } else {
                            app.back_to_compose();
                        }
                    }
                    KeyCode::Backspace => app.custom_backspace(),
                    KeyCode::Char(c) => app.custom_char(c),
                    _ => {}
                },
                Phase::Displayed => match key.code {
                    KeyCode::Char('s') => app.save().await?,
                    KeyCode::Char('n') => app.start_over(),
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Esc => app.dismiss_error(),
                    _ => {}
                },
            }
        }
    }
}
