use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "doctors-tui")]
#[command(about = "Terminal UI for managing doctors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured doctors API
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Store the API token
    Login,
    /// Remove the stored API token
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
