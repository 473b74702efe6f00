//! # tabby-panel
//!
//! Control panel for a TabbyAPI-compatible model server. Lets an operator store an
//! API key, list the models the server can serve, load one with a chosen context
//! length and cache quantization, and unload the current model.
//!
//! ## Modes
//! - Interactive terminal UI (default)
//! - One-shot subcommands: `models`, `load`, `unload`, `config`, `completions`

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands, ConfigSubcommand};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    if let Some(Commands::Completions { shell }) = &args.command {
        let mut cmd = Args::command();
        cli::generate(*shell, &mut cmd, core::app::NAME, &mut std::io::stdout());
        return Ok(());
    }
    if let Some(Commands::Config {
        subcommand: Some(ConfigSubcommand::SetApiKey { api_key }),
    }) = &args.command
    {
        core::cli::run_config_set_api_key(api_key.clone());
        return Ok(());
    }

    // Load application configuration (print user-friendly message; exit uses Display not Debug)
    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    match &args.command {
        None => run::launch_tui(config).await?,
        Some(command) => run::run_command(command, &config, args.api_key.as_deref()).await,
    }

    Ok(())
}
