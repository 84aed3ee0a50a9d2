mod app;
mod cli;
mod config;
mod form;
mod logging;
mod notifier;
mod runtime;
mod session_store;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::DoctorsConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use doctors_api::{DoctorsClient, DoctorsRepository, InMemoryDoctors, StaticToken};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env.doctors").ok();

    let cli = Cli::parse();
    let cfg = DoctorsConfig::load()?;

    match cli.command {
        Commands::Run => {
            init_logging(&cfg);
            let token = session_store::load_token()?
                .context("No API token stored. Run `doctors-tui login` first.")?;
            let client = DoctorsClient::new(&cfg.api_url, Arc::new(StaticToken::new(token)))?;
            tracing::info!(api_url = %client.base_url(), "starting against remote API");
            run_tui(App::new(&cfg, false), &client).await
        }
        Commands::Dev => {
            init_logging(&cfg);
            tracing::info!("starting in dev mode");
            run_tui(App::new(&cfg, true), &InMemoryDoctors::seeded()).await
        }
        Commands::Login => {
            let token = rpassword::prompt_password("API token: ")
                .context("Failed to read token")?;
            if token.trim().is_empty() {
                anyhow::bail!("Token must not be empty");
            }
            session_store::save_token(&token)?;
            println!("Token saved to {}", session_store::token_path()?.display());
            Ok(())
        }
        Commands::Logout => {
            session_store::clear_token()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = DoctorsConfig::config_path()?;
            if !path.exists() {
                DoctorsConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn init_logging(cfg: &DoctorsConfig) {
    if let Err(e) = logging::init(&cfg.log_level) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
}

async fn run_tui(mut app: App, repo: &dyn DoctorsRepository) -> Result<()> {
    runtime::reload_list(&mut app, repo).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, repo).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "terminal loop failed");
    }
    res
}
