use super::App;
use crate::event_handler::EventHandler;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Result, Stdout};
use std::{panic, time::Duration};

fn draw(app: &App, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.draw(|frame| app.render(frame))?;
    Ok(())
}

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal.clear()?;
    draw(app, &mut terminal)?;

    while !app.should_exit() {
        let tui_poll = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            EventHandler::read()
        };

        tokio::select! {
            maybe_event = tui_poll => {
                if let Some(event) = maybe_event? {
                    app.handle_event(event);
                    draw(app, &mut terminal)?;
                } else if app.recover_abandoned_turn() {
                    draw(app, &mut terminal)?;
                }
            }
            maybe_completion = app.completion_rx.recv() => {
                if let Some(completion) = maybe_completion {
                    app.handle_completion(completion);
                    draw(app, &mut terminal)?;
                }
            }
        }
    }

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}
