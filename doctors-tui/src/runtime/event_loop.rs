use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use doctors_api::DoctorsRepository;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    repo: &dyn DoctorsRepository,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_busy() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, &action_tx);
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, repo, |app| {
                app.throbber_state.calc_next();
                terminal.draw(|f| ui::render(f, app))?;
                Ok(())
            })
            .await?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
